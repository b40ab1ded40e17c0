//! Drivers for the places we can write tables to.

pub(crate) mod postgres;
pub(crate) mod postgres_shared;
pub(crate) mod postgres_sql;
