use contracts::enums::order_status::OrderStatus;
use thiserror::Error;

/// Ошибки смены статуса заказа
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderStatusError {
    #[error("Order is already in terminal status {from}")]
    TerminalStatus { from: OrderStatus },

    #[error("Transition {from} -> {to} is not allowed")]
    TransitionNotAllowed { from: OrderStatus, to: OrderStatus },

    #[error("Order number is empty")]
    MissingOrderNumber,
}

impl OrderStatusError {
    /// Машиночитаемый код ошибки для ответа API
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatusError::TerminalStatus { .. } => "terminal_status",
            OrderStatusError::TransitionNotAllowed { .. } => "transition_not_allowed",
            OrderStatusError::MissingOrderNumber => "missing_order_number",
        }
    }
}
