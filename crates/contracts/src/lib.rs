//! Общие типы, которые используют backend и клиенты API

pub mod domain;
pub mod enums;
