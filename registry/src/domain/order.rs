//! Commercial orders and recurring-billing subscriptions.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored order. Orders are never physically deleted; `deleted_at` marks
/// soft deletion and default read paths exclude such rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: i64,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer phone, if given.
    pub customer_phone: Option<String>,
    /// Purchased package name.
    pub package_name: String,
    /// Package category, if classified.
    pub package_type: Option<String>,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Payment channel.
    pub payment_method: String,
    /// Workflow status.
    pub status: String,
    /// The first order of the subscription this order belongs to, forming a
    /// tree rooted at that first order.
    pub parent_order_id: Option<i64>,
    /// Invoice number once issued.
    pub invoice_number: Option<String>,
    /// Invoice issue timestamp.
    pub invoice_issued_at: Option<DateTime<Utc>>,
    /// Soft-deletion marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The insert shape of an order: generated and defaulted columns omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer display name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer phone, if given.
    pub customer_phone: Option<String>,
    /// Purchased package name.
    pub package_name: String,
    /// Package category, if classified.
    pub package_type: Option<String>,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Payment channel.
    pub payment_method: String,
    /// Optional parent order for recurring months.
    pub parent_order_id: Option<i64>,
}

/// A recurring-billing subscription, mutated monthly by the billing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSubscription {
    /// Subscription identifier.
    pub id: i64,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer phone, if given.
    pub customer_phone: Option<String>,
    /// Subscribed package name.
    pub package_name: String,
    /// Monthly charge in minor currency units.
    pub monthly_amount: i64,
    /// Day of month the charge falls due, clamped to the length of the
    /// month being billed.
    pub monthly_payment_day: i32,
    /// Plan months already settled.
    pub paid_months: Vec<i32>,
    /// Next plan month to bill (1-based).
    pub current_month: i32,
    /// Total plan length in months.
    pub total_months: i32,
    /// The subscription's first order, root of the order tree.
    pub first_order_id: Option<i64>,
    /// Date the billing run last generated an order, `None` before the
    /// first generated month.
    pub last_billed_on: Option<NaiveDate>,
    /// Whether the subscription is live.
    pub is_active: bool,
}

impl RecurringSubscription {
    /// Whether the billing run should generate this subscription's next
    /// monthly order on `date`: the subscription is active, has plan months
    /// remaining, no order was generated in `date`'s calendar month yet, the
    /// payment day has been reached, and the plan month was not already
    /// settled.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        if !self.is_active || self.current_month > self.total_months {
            return false;
        }
        // One generated order per calendar month, whatever the plan state
        // looks like after it.
        if self
            .last_billed_on
            .is_some_and(|billed| (billed.year(), billed.month()) == (date.year(), date.month()))
        {
            return false;
        }
        if i64::from(date.day()) < i64::from(self.due_day_in(date)) {
            return false;
        }
        !self.paid_months.contains(&self.current_month)
    }

    /// The effective payment day in `date`'s month: the configured day,
    /// clamped so a day of 29–31 still falls due in shorter months.
    fn due_day_in(&self, date: NaiveDate) -> u32 {
        let month_length = days_in_month(date);
        u32::try_from(self.monthly_payment_day)
            .unwrap_or(1)
            .clamp(1, month_length)
    }

    /// The order draft for this subscription's next plan month.
    pub fn next_monthly_order(&self) -> OrderDraft {
        OrderDraft {
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            customer_phone: self.customer_phone.clone(),
            package_name: self.package_name.clone(),
            package_type: Some("recurring".to_owned()),
            amount: self.monthly_amount,
            payment_method: "recurring".to_owned(),
            parent_order_id: self.first_order_id,
        }
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let year = date.year();
    let month = date.month();
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}
