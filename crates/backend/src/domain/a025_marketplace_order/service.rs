use contracts::domain::a025_marketplace_order::aggregate::{
    MarketplaceOrder, OrderStatusInfo, StatusChangeRequest, StatusNormalization,
    StatusTransitionCheck,
};
use contracts::enums::order_status::{self, OrderStatus, StatusResolution, StatusSource};

use super::error::OrderStatusError;
use crate::shared::config::{self, OrdersConfig};

/// Нужно ли предупреждать о подстановке статуса по умолчанию
pub fn should_warn_on_fallback(resolution: &StatusResolution, settings: &OrdersConfig) -> bool {
    settings.warn_on_unrecognized_status && resolution.source == StatusSource::Unrecognized
}

/// Нормализовать статус с явными настройками и залогировать подстановку.
///
/// Возвращаемое значение всегда совпадает с `order_status::normalize`.
pub fn resolve_status_with(input: Option<&str>, settings: &OrdersConfig) -> OrderStatus {
    let resolution = order_status::classify(input);

    if should_warn_on_fallback(&resolution, settings) {
        tracing::warn!(
            "Unrecognized order status {:?}, falling back to {}",
            input.unwrap_or_default(),
            resolution.status
        );
    } else if resolution.source == StatusSource::Legacy {
        tracing::debug!(
            "Legacy order status {:?} mapped to {}",
            input.unwrap_or_default(),
            resolution.status
        );
    }

    resolution.status
}

/// Нормализовать статус с настройками, установленными при старте
pub fn resolve_status(input: Option<&str>) -> OrderStatus {
    resolve_status_with(input, &config::orders_config())
}

/// Справочник всех статусов с допустимыми переходами
pub fn status_catalog() -> Vec<OrderStatusInfo> {
    OrderStatus::all()
        .iter()
        .copied()
        .map(OrderStatusInfo::from)
        .collect()
}

pub fn normalize(input: Option<&str>) -> StatusNormalization {
    let status = resolve_status(input);

    StatusNormalization {
        input: input.map(str::to_string),
        status,
        label: status.label().to_string(),
        legacy: order_status::is_legacy(input),
        resolution: order_status::classify(input).source,
    }
}

pub fn check_transition(from: Option<&str>, to: Option<&str>) -> StatusTransitionCheck {
    let from_status = resolve_status(from);
    let to_status = resolve_status(to);

    StatusTransitionCheck {
        from: from_status,
        to: to_status,
        from_label: from_status.label().to_string(),
        to_label: to_status.label().to_string(),
        allowed: from_status.can_transition_to(to_status),
        legacy_from: order_status::is_legacy(from),
        legacy_to: order_status::is_legacy(to),
    }
}

/// Подготовить запрос на смену статуса для внешнего API.
///
/// Ничего не отправляет: только проверяет переход и собирает payload.
pub fn plan_status_change(
    order: &MarketplaceOrder,
    target: &str,
) -> Result<StatusChangeRequest, OrderStatusError> {
    let order_number = order.order_number.trim();
    if order_number.is_empty() {
        return Err(OrderStatusError::MissingOrderNumber);
    }

    let from = resolve_status(order.status.as_deref());
    let to = resolve_status(Some(target));

    if from.is_terminal() {
        return Err(OrderStatusError::TerminalStatus { from });
    }

    if !from.can_transition_to(to) {
        return Err(OrderStatusError::TransitionNotAllowed { from, to });
    }

    tracing::info!("Order {}: planned status change {} -> {}", order_number, from, to);

    Ok(StatusChangeRequest {
        order_number: order_number.to_string(),
        from,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(number: &str, status: Option<&str>) -> MarketplaceOrder {
        MarketplaceOrder {
            order_number: number.to_string(),
            status: status.map(str::to_string),
            items: Vec::new(),
            total_amount: None,
            currency: None,
            created_at: None,
        }
    }

    #[test]
    fn test_resolve_status_matches_normalize() {
        for input in [None, Some(""), Some("paid"), Some("IN_DELIVERY"), Some("bogus")] {
            assert_eq!(resolve_status(input), order_status::normalize(input));
        }
    }

    #[test]
    fn test_fallback_warning_follows_setting() {
        let enabled = OrdersConfig {
            warn_on_unrecognized_status: true,
        };
        let disabled = OrdersConfig {
            warn_on_unrecognized_status: false,
        };

        let unknown = order_status::classify(Some("RETURNED"));
        assert!(should_warn_on_fallback(&unknown, &enabled));
        assert!(!should_warn_on_fallback(&unknown, &disabled));

        for input in [None, Some(""), Some("PAID"), Some("COMPLETED")] {
            let resolution = order_status::classify(input);
            assert!(!should_warn_on_fallback(&resolution, &enabled));
        }

        // Выключенное предупреждение не меняет результат
        assert_eq!(
            resolve_status_with(Some("RETURNED"), &disabled),
            OrderStatus::PendingPayment
        );
        assert_eq!(
            resolve_status_with(Some("shipped"), &disabled),
            OrderStatus::InDelivery
        );
    }

    #[test]
    fn test_status_catalog() {
        let catalog = status_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[0].code, OrderStatus::PendingPayment);
        assert_eq!(
            catalog.iter().filter(|s| s.terminal).count(),
            2,
            "only COMPLETED and CANCELED are terminal"
        );
    }

    #[test]
    fn test_normalize_reports_resolution() {
        let n = normalize(Some(" Delivered "));
        assert_eq!(n.status, OrderStatus::Completed);
        assert_eq!(n.label, "Completed");
        assert!(n.legacy);
        assert_eq!(n.resolution, StatusSource::Legacy);

        let n = normalize(Some("REFUNDED"));
        assert_eq!(n.status, OrderStatus::PendingPayment);
        assert!(!n.legacy);
        assert_eq!(n.resolution, StatusSource::Unrecognized);
    }

    #[test]
    fn test_check_transition() {
        let check = check_transition(Some("PAID"), Some("processing"));
        assert!(check.allowed);
        assert_eq!(check.from, OrderStatus::PaymentVerification);
        assert_eq!(check.to, OrderStatus::Processing);
        assert!(check.legacy_from);
        assert!(!check.legacy_to);

        let check = check_transition(Some("PENDING_PAYMENT"), Some("PROCESSING"));
        assert!(!check.allowed);
    }

    #[test]
    fn test_plan_status_change_ok() {
        let request = plan_status_change(&order(" ORD-7 ", Some("shipped")), "completed").unwrap();
        assert_eq!(
            request,
            StatusChangeRequest {
                order_number: "ORD-7".to_string(),
                from: OrderStatus::InDelivery,
                to: OrderStatus::Completed,
            }
        );
    }

    #[test]
    fn test_plan_status_change_rejects_terminal() {
        let err = plan_status_change(&order("ORD-8", Some("DELIVERED")), "CANCELED").unwrap_err();
        assert_eq!(
            err,
            OrderStatusError::TerminalStatus {
                from: OrderStatus::Completed
            }
        );
        assert_eq!(err.code(), "terminal_status");
    }

    #[test]
    fn test_plan_status_change_rejects_skipped_step() {
        let err = plan_status_change(&order("ORD-9", None), "IN_DELIVERY").unwrap_err();
        assert_eq!(
            err,
            OrderStatusError::TransitionNotAllowed {
                from: OrderStatus::PendingPayment,
                to: OrderStatus::InDelivery
            }
        );
        assert_eq!(
            err.to_string(),
            "Transition PENDING_PAYMENT -> IN_DELIVERY is not allowed"
        );
    }

    #[test]
    fn test_plan_status_change_requires_order_number() {
        let err = plan_status_change(&order("  ", Some("NEW")), "PAID").unwrap_err();
        assert_eq!(err, OrderStatusError::MissingOrderNumber);
    }
}
