use serde::{Deserialize, Serialize};
use std::fmt;

/// Канонические статусы заказа маркетплейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    PaymentVerification,
    Processing,
    InDelivery,
    Completed,
    Canceled,
}

/// Как было получено каноническое значение статуса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    /// Пустое значение или отсутствует
    Empty,
    /// Уже канонический код
    Canonical,
    /// Исторический код из таблицы алиасов
    Legacy,
    /// Неизвестный код, подставлен статус по умолчанию
    Unrecognized,
}

/// Результат разбора входной строки статуса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusResolution {
    pub status: OrderStatus,
    pub source: StatusSource,
}

impl OrderStatus {
    /// Статус для пустых и нераспознанных значений
    pub const DEFAULT: OrderStatus = OrderStatus::PendingPayment;

    const ALL: [OrderStatus; 6] = [
        OrderStatus::PendingPayment,
        OrderStatus::PaymentVerification,
        OrderStatus::Processing,
        OrderStatus::InDelivery,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::PaymentVerification => "PAYMENT_VERIFICATION",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::InDelivery => "IN_DELIVERY",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    /// Получить человекочитаемое название
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "Pending Payment",
            OrderStatus::PaymentVerification => "Payment Verification",
            OrderStatus::Processing => "Processing",
            OrderStatus::InDelivery => "In Delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Получить все статусы в порядке жизненного цикла
    pub fn all() -> &'static [OrderStatus] {
        &Self::ALL
    }

    /// Парсинг канонического кода (без алиасов и без учета регистра)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING_PAYMENT" => Some(OrderStatus::PendingPayment),
            "PAYMENT_VERIFICATION" => Some(OrderStatus::PaymentVerification),
            "PROCESSING" => Some(OrderStatus::Processing),
            "IN_DELIVERY" => Some(OrderStatus::InDelivery),
            "COMPLETED" => Some(OrderStatus::Completed),
            "CANCELED" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }

    /// Допустимые следующие статусы
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::PendingPayment => {
                &[OrderStatus::PaymentVerification, OrderStatus::Canceled]
            }
            OrderStatus::PaymentVerification => &[OrderStatus::Processing, OrderStatus::Canceled],
            OrderStatus::Processing => &[OrderStatus::InDelivery, OrderStatus::Canceled],
            OrderStatus::InDelivery => &[OrderStatus::Completed],
            OrderStatus::Completed | OrderStatus::Canceled => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        self.allowed_next().contains(&to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        normalize(Some(value))
    }
}

/// Исторические коды статусов и их канонические эквиваленты
fn legacy_alias(code: &str) -> Option<OrderStatus> {
    match code {
        "NEW" | "PENDING" => Some(OrderStatus::PendingPayment),
        "PAID" => Some(OrderStatus::PaymentVerification),
        "SHIPPED" => Some(OrderStatus::InDelivery),
        "DELIVERED" => Some(OrderStatus::Completed),
        "CANCELLED" => Some(OrderStatus::Canceled),
        _ => None,
    }
}

/// Разбор статуса с указанием источника значения.
///
/// Возвращаемый статус всегда совпадает с [`normalize`]; `source` позволяет
/// вызывающему коду залогировать подстановку значения по умолчанию.
pub fn classify(input: Option<&str>) -> StatusResolution {
    let code = input.unwrap_or_default().trim().to_uppercase();

    if code.is_empty() {
        return StatusResolution {
            status: OrderStatus::DEFAULT,
            source: StatusSource::Empty,
        };
    }

    if let Some(status) = OrderStatus::from_code(&code) {
        return StatusResolution {
            status,
            source: StatusSource::Canonical,
        };
    }

    match legacy_alias(&code) {
        Some(status) => StatusResolution {
            status,
            source: StatusSource::Legacy,
        },
        None => StatusResolution {
            status: OrderStatus::DEFAULT,
            source: StatusSource::Unrecognized,
        },
    }
}

/// Нормализовать любой статус (в т.ч. исторический) к каноническому
///
/// # Примеры
/// ```
/// use contracts::enums::order_status::{normalize, OrderStatus};
/// assert_eq!(normalize(Some(" paid ")), OrderStatus::PaymentVerification);
/// assert_eq!(normalize(None), OrderStatus::PendingPayment);
/// ```
pub fn normalize(input: Option<&str>) -> OrderStatus {
    classify(input).status
}

/// Является ли значение историческим кодом (для бейджа в UI)
pub fn is_legacy(input: Option<&str>) -> bool {
    let code = input.unwrap_or_default().trim().to_uppercase();
    legacy_alias(&code).is_some()
}

pub fn label_for(input: Option<&str>) -> &'static str {
    normalize(input).label()
}

/// Проверка допустимости перехода между статусами (оба нормализуются)
pub fn is_transition_allowed(from: Option<&str>, to: Option<&str>) -> bool {
    normalize(from).can_transition_to(normalize(to))
}
