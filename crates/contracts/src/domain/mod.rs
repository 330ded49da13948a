pub mod a025_marketplace_order;
