//! Built-in rule implementations

pub mod member_data;
pub mod rx_subscribe;
pub mod sealed_class;
pub mod struct_ctor;
pub mod technical_debt;
pub mod virtual_call;
