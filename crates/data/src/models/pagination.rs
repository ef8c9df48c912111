use serde::{Deserialize, Serialize};

/// One page of a listing as returned by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
