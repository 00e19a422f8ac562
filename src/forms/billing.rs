use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct IssueInvoiceForm {
    pub order_id: i32,
    #[validate(range(min = 1))]
    pub amount_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetInvoiceStatusForm {
    pub id: i32,
    pub status: String,
}
