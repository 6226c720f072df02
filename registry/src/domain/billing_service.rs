//! Monthly order generation for recurring subscriptions.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::{
    OrderRepository, OrderRepositoryError, SubscriptionRepository, SubscriptionRepositoryError,
};

/// Outcome of one billing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillingRunReport {
    /// Subscriptions examined.
    pub examined: usize,
    /// Orders generated.
    pub generated: usize,
}

/// Service driving the periodic billing run.
#[derive(Clone)]
pub struct BillingService<S, O> {
    subscriptions: Arc<S>,
    orders: Arc<O>,
}

impl<S, O> BillingService<S, O> {
    /// Create a service over the given repositories.
    pub fn new(subscriptions: Arc<S>, orders: Arc<O>) -> Self {
        Self {
            subscriptions,
            orders,
        }
    }
}

impl<S, O> BillingService<S, O>
where
    S: SubscriptionRepository,
    O: OrderRepository,
{
    /// Generate the monthly order for every active subscription that is due
    /// on `today`, then advance each billed subscription past the generated
    /// month.
    ///
    /// The run is idempotent within a calendar month: billing stamps the
    /// subscription with `today`, and a stamped month is never billed again
    /// however far the plan has advanced.
    pub async fn generate_monthly_orders(
        &self,
        today: NaiveDate,
    ) -> Result<BillingRunReport, DomainError> {
        let subscriptions = self
            .subscriptions
            .list_active()
            .await
            .map_err(map_subscription_error)?;

        let mut report = BillingRunReport {
            examined: subscriptions.len(),
            generated: 0,
        };
        for subscription in subscriptions {
            if !subscription.is_due_on(today) {
                continue;
            }
            if subscription.first_order_id.is_none() {
                // Cannot parent the monthly order; skip rather than orphan it.
                warn!(
                    subscription = subscription.id,
                    "active subscription has no first order"
                );
                continue;
            }
            let order = self
                .orders
                .insert(&subscription.next_monthly_order())
                .await
                .map_err(map_order_error)?;
            self.subscriptions
                .mark_billed(subscription.id, subscription.current_month, today)
                .await
                .map_err(map_subscription_error)?;
            info!(
                subscription = subscription.id,
                order = order.id,
                month = subscription.current_month,
                "monthly order generated"
            );
            report.generated += 1;
        }
        Ok(report)
    }
}

fn map_subscription_error(error: SubscriptionRepositoryError) -> DomainError {
    match error {
        SubscriptionRepositoryError::Connection { message } => DomainError::service_unavailable(
            format!("subscription repository unavailable: {message}"),
        ),
        SubscriptionRepositoryError::Query { message } => {
            DomainError::internal(format!("subscription repository error: {message}"))
        }
    }
}

fn map_order_error(error: OrderRepositoryError) -> DomainError {
    match error {
        OrderRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            DomainError::internal(format!("order repository error: {message}"))
        }
        OrderRepositoryError::MissingParent { .. } => DomainError::conflict(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, NaiveDate, Utc};
    use mockall::predicate::eq;

    use super::BillingService;
    use crate::domain::order::{Order, OrderDraft, RecurringSubscription};
    use crate::domain::ports::{MockOrderRepository, MockSubscriptionRepository};

    fn subscription(id: i64, payment_day: i32) -> RecurringSubscription {
        RecurringSubscription {
            id,
            customer_name: "Ayse".to_owned(),
            customer_email: "ayse@example.com".to_owned(),
            customer_phone: None,
            package_name: "Basic".to_owned(),
            monthly_amount: 100_00,
            monthly_payment_day: payment_day,
            paid_months: vec![1],
            current_month: 2,
            total_months: 6,
            first_order_id: Some(41),
            last_billed_on: None,
            is_active: true,
        }
    }

    fn order_from(draft: &OrderDraft) -> Order {
        let now: DateTime<Utc> = Utc::now();
        Order {
            id: 900,
            customer_name: draft.customer_name.clone(),
            customer_email: draft.customer_email.clone(),
            customer_phone: draft.customer_phone.clone(),
            package_name: draft.package_name.clone(),
            package_type: draft.package_type.clone(),
            amount: draft.amount,
            payment_method: draft.payment_method.clone(),
            status: "pending".to_owned(),
            parent_order_id: draft.parent_order_id,
            invoice_number: None,
            invoice_issued_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).expect("valid date")
    }

    #[tokio::test]
    async fn due_subscriptions_get_an_order_and_advance() {
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions
            .expect_list_active()
            .times(1)
            .return_once(|| Ok(vec![subscription(1, 10)]));
        subscriptions
            .expect_mark_billed()
            .with(eq(1), eq(2), eq(day(15)))
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let mut orders = MockOrderRepository::new();
        orders
            .expect_insert()
            .withf(|draft| draft.parent_order_id == Some(41) && draft.amount == 100_00)
            .times(1)
            .return_once(|draft| Ok(order_from(draft)));

        let service = BillingService::new(Arc::new(subscriptions), Arc::new(orders));
        let report = service
            .generate_monthly_orders(day(15))
            .await
            .expect("billing run");
        assert_eq!(report.examined, 1);
        assert_eq!(report.generated, 1);
    }

    #[tokio::test]
    async fn subscriptions_before_their_payment_day_are_skipped() {
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions
            .expect_list_active()
            .times(1)
            .return_once(|| Ok(vec![subscription(1, 20)]));
        subscriptions.expect_mark_billed().times(0);

        let mut orders = MockOrderRepository::new();
        orders.expect_insert().times(0);

        let service = BillingService::new(Arc::new(subscriptions), Arc::new(orders));
        let report = service
            .generate_monthly_orders(day(15))
            .await
            .expect("billing run");
        assert_eq!(report.examined, 1);
        assert_eq!(report.generated, 0);
    }

    #[tokio::test]
    async fn subscriptions_without_a_first_order_are_skipped() {
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_list_active().times(1).return_once(|| {
            let mut sub = subscription(1, 10);
            sub.first_order_id = None;
            Ok(vec![sub])
        });
        subscriptions.expect_mark_billed().times(0);

        let mut orders = MockOrderRepository::new();
        orders.expect_insert().times(0);

        let service = BillingService::new(Arc::new(subscriptions), Arc::new(orders));
        let report = service
            .generate_monthly_orders(day(15))
            .await
            .expect("billing run");
        assert_eq!(report.generated, 0);
    }

    #[tokio::test]
    async fn a_rerun_in_the_billed_month_generates_nothing() {
        // State of a subscription right after a successful run: the plan has
        // advanced to the next month but this calendar month is stamped.
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_list_active().times(1).return_once(|| {
            let mut sub = subscription(1, 10);
            sub.paid_months.push(2);
            sub.current_month = 3;
            sub.last_billed_on = Some(day(15));
            Ok(vec![sub])
        });
        subscriptions.expect_mark_billed().times(0);

        let mut orders = MockOrderRepository::new();
        orders.expect_insert().times(0);

        let service = BillingService::new(Arc::new(subscriptions), Arc::new(orders));
        let report = service
            .generate_monthly_orders(day(15))
            .await
            .expect("billing run");
        assert_eq!(report.generated, 0);
    }
}
