//! Subscription business logic
//!
//! Subscriptions are created `pending` together with an order and a gateway
//! checkout; they only become `active` through the payment notify flow.

use crate::domain::{
    generate_order_no, CheckoutResponse, CreatePlanInput, NewOrder, OrderKind, Plan, StringUuid,
    SubscribeInput, Subscription, UpdatePlanInput,
};
use crate::error::{AppError, Result};
use crate::payment::Gateway;
use crate::repository::{paginate, OrderRepository, Page, PlanRepository, SubscriptionRepository};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct SubscriptionService<SR, PR, OR>
where
    SR: SubscriptionRepository,
    PR: PlanRepository,
    OR: OrderRepository,
{
    repo: Arc<SR>,
    plan_repo: Arc<PR>,
    order_repo: Arc<OR>,
    gateway: Arc<Gateway>,
}

impl<SR, PR, OR> SubscriptionService<SR, PR, OR>
where
    SR: SubscriptionRepository,
    PR: PlanRepository,
    OR: OrderRepository,
{
    pub fn new(
        repo: Arc<SR>,
        plan_repo: Arc<PR>,
        order_repo: Arc<OR>,
        gateway: Arc<Gateway>,
    ) -> Self {
        Self {
            repo,
            plan_repo,
            order_repo,
            gateway,
        }
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.plan_repo.list_active().await
    }

    /// Start a subscription: pending subscription + pending order + checkout
    pub async fn subscribe(
        &self,
        brand_id: StringUuid,
        input: SubscribeInput,
    ) -> Result<CheckoutResponse> {
        input.validate()?;

        let plan = self
            .plan_repo
            .find_by_id(input.plan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此方案".to_string()))?;
        if !plan.is_active {
            return Err(AppError::BadRequest("此方案已停售".to_string()));
        }

        if self.repo.find_active_by_brand(brand_id).await?.is_some() {
            return Err(AppError::BadRequest("已有生效中的訂閱".to_string()));
        }

        let subscription = self.repo.create_pending(brand_id, plan.id).await?;

        let order = self
            .order_repo
            .create(&NewOrder {
                order_no: generate_order_no(),
                brand_id,
                kind: OrderKind::Subscription,
                item_id: subscription.id,
                amount: plan.price,
            })
            .await?;

        let checkout = self
            .gateway
            .create_checkout(&order.order_no, order.amount, &plan.name)
            .await?;

        info!(order_no = %order.order_no, brand_id = %brand_id, "subscription checkout created");

        Ok(CheckoutResponse {
            order_no: order.order_no,
            checkout_url: checkout.checkout_url,
        })
    }

    pub async fn current(&self, brand_id: StringUuid) -> Result<Subscription> {
        self.repo
            .find_active_by_brand(brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("目前沒有生效中的訂閱".to_string()))
    }

    pub async fn cancel(&self, brand_id: StringUuid) -> Result<()> {
        self.repo.cancel_active(brand_id).await
    }

    // Admin plan management

    pub async fn list_plans_paged(&self, page: i64, per_page: i64) -> Result<Page<Plan>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.plan_repo.list(limit, offset),
            || self.plan_repo.count(),
        )
        .await
    }

    pub async fn create_plan(&self, input: CreatePlanInput) -> Result<Plan> {
        input.validate()?;
        self.plan_repo.create(&input).await
    }

    pub async fn update_plan(&self, id: StringUuid, input: UpdatePlanInput) -> Result<Plan> {
        input.validate()?;
        self.plan_repo.update(id, &input).await
    }

    pub async fn remove_plan(&self, id: StringUuid) -> Result<()> {
        self.plan_repo.deactivate(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentConfig;
    use crate::domain::Order;
    use crate::repository::order::MockOrderRepository;
    use crate::repository::plan::MockPlanRepository;
    use crate::repository::subscription::MockSubscriptionRepository;
    use mockall::predicate::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(base_url: &str) -> Arc<Gateway> {
        Arc::new(Gateway::new(PaymentConfig {
            base_url: base_url.to_string(),
            merchant_id: "MS0001".to_string(),
            secret_key: "gateway-secret".to_string(),
            notify_url: "http://localhost:8080/api/v1/payments/notify".to_string(),
        }))
    }

    fn service(
        sub_repo: MockSubscriptionRepository,
        plan_repo: MockPlanRepository,
        order_repo: MockOrderRepository,
        base_url: &str,
    ) -> SubscriptionService<MockSubscriptionRepository, MockPlanRepository, MockOrderRepository>
    {
        SubscriptionService::new(
            Arc::new(sub_repo),
            Arc::new(plan_repo),
            Arc::new(order_repo),
            gateway(base_url),
        )
    }

    #[tokio::test]
    async fn test_subscribe_unknown_plan() {
        let mut plan_repo = MockPlanRepository::new();
        plan_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = service(
            MockSubscriptionRepository::new(),
            plan_repo,
            MockOrderRepository::new(),
            "http://localhost:9000",
        );

        let result = service
            .subscribe(
                StringUuid::new_v4(),
                SubscribeInput {
                    plan_id: StringUuid::new_v4(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_subscribe_rejects_existing_active_subscription() {
        let mut plan_repo = MockPlanRepository::new();
        let plan = Plan::default();
        let plan_id = plan.id;
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| Ok(Some(plan.clone())));

        let mut sub_repo = MockSubscriptionRepository::new();
        sub_repo
            .expect_find_active_by_brand()
            .returning(|_| Ok(Some(Subscription::default())));

        let service = service(
            sub_repo,
            plan_repo,
            MockOrderRepository::new(),
            "http://localhost:9000",
        );

        let result = service
            .subscribe(StringUuid::new_v4(), SubscribeInput { plan_id })
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "已有生效中的訂閱"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subscribe_rejects_inactive_plan() {
        let mut plan_repo = MockPlanRepository::new();
        let plan = Plan {
            is_active: false,
            ..Default::default()
        };
        let plan_id = plan.id;
        plan_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(plan.clone())));

        let service = service(
            MockSubscriptionRepository::new(),
            plan_repo,
            MockOrderRepository::new(),
            "http://localhost:9000",
        );

        let result = service
            .subscribe(StringUuid::new_v4(), SubscribeInput { plan_id })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_subscribe_creates_order_and_checkout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "checkout_url": "https://pay.example.com/c/xyz",
                "provider_ref": "TX-1"
            })))
            .mount(&server)
            .await;

        let brand_id = StringUuid::new_v4();
        let plan = Plan {
            price: 1200,
            ..Default::default()
        };
        let plan_id = plan.id;

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(plan.clone())));

        let mut sub_repo = MockSubscriptionRepository::new();
        sub_repo
            .expect_find_active_by_brand()
            .with(eq(brand_id))
            .returning(|_| Ok(None));
        sub_repo
            .expect_create_pending()
            .with(eq(brand_id), eq(plan_id))
            .returning(|brand_id, plan_id| {
                Ok(Subscription {
                    brand_id,
                    plan_id,
                    ..Default::default()
                })
            });

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().returning(|input| {
            assert_eq!(input.amount, 1200);
            assert_eq!(input.kind, OrderKind::Subscription);
            Ok(Order {
                order_no: input.order_no.clone(),
                brand_id: input.brand_id,
                kind: input.kind,
                item_id: input.item_id,
                amount: input.amount,
                ..Default::default()
            })
        });

        let service = service(sub_repo, plan_repo, order_repo, &server.uri());
        let checkout = service
            .subscribe(brand_id, SubscribeInput { plan_id })
            .await
            .unwrap();

        assert_eq!(checkout.checkout_url, "https://pay.example.com/c/xyz");
        assert!(checkout.order_no.starts_with("RO"));
    }

    #[tokio::test]
    async fn test_current_none_is_not_found() {
        let mut sub_repo = MockSubscriptionRepository::new();
        sub_repo
            .expect_find_active_by_brand()
            .returning(|_| Ok(None));

        let service = service(
            sub_repo,
            MockPlanRepository::new(),
            MockOrderRepository::new(),
            "http://localhost:9000",
        );

        let result = service.current(StringUuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
