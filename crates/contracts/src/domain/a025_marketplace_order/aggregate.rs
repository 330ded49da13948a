use crate::enums::order_status::{self, OrderStatus, StatusSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Строка заказа (позиция)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceOrderItem {
    /// Артикул продавца
    pub sku: String,
    /// Название товара
    pub name: String,
    /// Количество
    pub qty: f64,
    /// Цена за единицу
    #[serde(default)]
    pub price: Option<f64>,
}

/// Заказ маркетплейса в том виде, в каком его отдает внешний REST API.
///
/// Статус хранится как есть (может быть историческим или пустым),
/// каноническое значение вычисляется через [`MarketplaceOrder::status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceOrder {
    /// Номер заказа
    pub order_number: String,
    /// Исходный статус из API
    #[serde(default)]
    pub status: Option<String>,
    /// Позиции заказа
    #[serde(default)]
    pub items: Vec<MarketplaceOrderItem>,
    /// Общая сумма заказа
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// Валюта заказа
    #[serde(default)]
    pub currency: Option<String>,
    /// Дата создания заказа
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MarketplaceOrder {
    /// Нормализованный статус заказа
    pub fn status(&self) -> OrderStatus {
        order_status::normalize(self.status.as_deref())
    }

    pub fn status_label(&self) -> &'static str {
        self.status().label()
    }

    /// Статус пришел в историческом формате (для бейджа)
    pub fn has_legacy_status(&self) -> bool {
        order_status::is_legacy(self.status.as_deref())
    }

    pub fn available_transitions(&self) -> &'static [OrderStatus] {
        self.status().allowed_next()
    }

    pub fn can_move_to(&self, target: &str) -> bool {
        order_status::is_transition_allowed(self.status.as_deref(), Some(target))
    }

    /// Сумма по строкам, если у всех строк есть цена
    pub fn items_total(&self) -> Option<f64> {
        self.items
            .iter()
            .map(|item| item.price.map(|p| p * item.qty))
            .sum()
    }
}

/// Строка справочника статусов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusInfo {
    pub code: OrderStatus,
    pub label: String,
    pub terminal: bool,
    pub next: Vec<OrderStatus>,
}

impl From<OrderStatus> for OrderStatusInfo {
    fn from(status: OrderStatus) -> Self {
        Self {
            code: status,
            label: status.label().to_string(),
            terminal: status.is_terminal(),
            next: status.allowed_next().to_vec(),
        }
    }
}

/// Результат нормализации входной строки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusNormalization {
    pub input: Option<String>,
    pub status: OrderStatus,
    pub label: String,
    pub legacy: bool,
    pub resolution: StatusSource,
}

/// Результат проверки перехода между статусами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransitionCheck {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub from_label: String,
    pub to_label: String,
    pub allowed: bool,
    pub legacy_from: bool,
    pub legacy_to: bool,
}

/// Запрос на смену статуса заказа во внешнем API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub order_number: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
}
