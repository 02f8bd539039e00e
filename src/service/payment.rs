//! Payment capture business logic
//!
//! Handles the gateway's notify callback: verify the signature, transition the
//! order, then fulfill whatever the order paid for. Replayed notifies and lost
//! `pending → paid` races are treated as success so the provider stops
//! retrying.

use crate::domain::{Order, OrderKind, OrderStatus, PlanInterval, StringUuid};
use crate::error::{AppError, Result};
use crate::payment::{Gateway, NotifyPayload};
use crate::repository::{
    paginate, BrandRepository, CreditPurchaseRepository, OrderRepository, Page, PlanRepository,
    SubscriptionRepository,
};
use chrono::{Months, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub struct PaymentService<OR, SR, PR, CR, BR>
where
    OR: OrderRepository,
    SR: SubscriptionRepository,
    PR: PlanRepository,
    CR: CreditPurchaseRepository,
    BR: BrandRepository,
{
    order_repo: Arc<OR>,
    subscription_repo: Arc<SR>,
    plan_repo: Arc<PR>,
    purchase_repo: Arc<CR>,
    brand_repo: Arc<BR>,
    gateway: Arc<Gateway>,
}

impl<OR, SR, PR, CR, BR> PaymentService<OR, SR, PR, CR, BR>
where
    OR: OrderRepository,
    SR: SubscriptionRepository,
    PR: PlanRepository,
    CR: CreditPurchaseRepository,
    BR: BrandRepository,
{
    pub fn new(
        order_repo: Arc<OR>,
        subscription_repo: Arc<SR>,
        plan_repo: Arc<PR>,
        purchase_repo: Arc<CR>,
        brand_repo: Arc<BR>,
        gateway: Arc<Gateway>,
    ) -> Self {
        Self {
            order_repo,
            subscription_repo,
            plan_repo,
            purchase_repo,
            brand_repo,
            gateway,
        }
    }

    pub async fn list_orders(
        &self,
        brand_id: StringUuid,
        page: i64,
        per_page: i64,
    ) -> Result<Page<Order>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.order_repo.list_by_brand(brand_id, limit, offset),
            || self.order_repo.count_by_brand(brand_id),
        )
        .await
    }

    /// Process a payment notification from the gateway
    pub async fn handle_notify(&self, payload: NotifyPayload) -> Result<()> {
        self.gateway.verify_notify(&payload)?;

        let order = self
            .order_repo
            .find_by_order_no(&payload.order_no)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此訂單".to_string()))?;

        if payload.amount != order.amount {
            warn!(order_no = %order.order_no, expected = order.amount, got = payload.amount, "notify amount mismatch");
            return Err(AppError::BadRequest("訂單金額不符".to_string()));
        }

        if order.status == OrderStatus::Paid {
            info!(order_no = %order.order_no, "notify replay for paid order, ignoring");
            return Ok(());
        }

        if payload.status != "paid" {
            self.order_repo.mark_failed(order.id).await?;
            info!(order_no = %order.order_no, status = %payload.status, "payment failure recorded");
            return Ok(());
        }

        let updated = self
            .order_repo
            .mark_paid(order.id, &payload.provider_ref)
            .await?;
        if updated == 0 {
            // A concurrent notify won the transition
            info!(order_no = %order.order_no, "order already transitioned, ignoring");
            return Ok(());
        }

        match order.kind {
            OrderKind::Subscription => self.fulfill_subscription(&order).await,
            OrderKind::CreditPackage => self.fulfill_credit_purchase(&order).await,
        }
    }

    async fn fulfill_subscription(&self, order: &Order) -> Result<()> {
        let subscription = self
            .subscription_repo
            .find_by_id(order.item_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "order {} references missing subscription",
                    order.order_no
                ))
            })?;

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "subscription {} references missing plan",
                    subscription.id
                ))
            })?;

        let period_start = Utc::now();
        let months = match plan.interval {
            PlanInterval::Month => 1,
            PlanInterval::Year => 12,
        };
        let period_end = period_start
            .checked_add_months(Months::new(months))
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("billing period overflow")))?;

        self.subscription_repo
            .activate(subscription.id, period_start, period_end)
            .await?;

        if plan.credit_grant > 0 {
            self.brand_repo
                .add_credits(order.brand_id, plan.credit_grant)
                .await?;
        }

        info!(order_no = %order.order_no, subscription_id = %subscription.id, "subscription activated");
        Ok(())
    }

    async fn fulfill_credit_purchase(&self, order: &Order) -> Result<()> {
        let purchase = self
            .purchase_repo
            .find_by_order(order.id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "order {} references missing credit purchase",
                    order.order_no
                ))
            })?;

        // Credits are added only on the first transition
        if self.purchase_repo.mark_paid(purchase.id).await? > 0 {
            self.brand_repo
                .add_credits(order.brand_id, purchase.credits)
                .await?;
        }

        info!(order_no = %order.order_no, credits = purchase.credits, "credit purchase fulfilled");
        Ok(())
    }
}
