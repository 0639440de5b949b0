pub mod notifications_entity;
