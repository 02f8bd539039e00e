//! Credit package and purchase business logic

use crate::domain::{
    generate_order_no, CheckoutResponse, CreateCreditPackageInput, CreditBalance, CreditPackage,
    CreditPurchase, NewOrder, OrderKind, PurchaseInput, StringUuid, UpdateCreditPackageInput,
};
use crate::error::{AppError, Result};
use crate::payment::Gateway;
use crate::repository::{
    paginate, BrandRepository, CreditPackageRepository, CreditPurchaseRepository, OrderRepository,
    Page,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct CreditService<CP, CR, OR, BR>
where
    CP: CreditPackageRepository,
    CR: CreditPurchaseRepository,
    OR: OrderRepository,
    BR: BrandRepository,
{
    package_repo: Arc<CP>,
    purchase_repo: Arc<CR>,
    order_repo: Arc<OR>,
    brand_repo: Arc<BR>,
    gateway: Arc<Gateway>,
}

impl<CP, CR, OR, BR> CreditService<CP, CR, OR, BR>
where
    CP: CreditPackageRepository,
    CR: CreditPurchaseRepository,
    OR: OrderRepository,
    BR: BrandRepository,
{
    pub fn new(
        package_repo: Arc<CP>,
        purchase_repo: Arc<CR>,
        order_repo: Arc<OR>,
        brand_repo: Arc<BR>,
        gateway: Arc<Gateway>,
    ) -> Self {
        Self {
            package_repo,
            purchase_repo,
            order_repo,
            brand_repo,
            gateway,
        }
    }

    pub async fn list_packages(&self) -> Result<Vec<CreditPackage>> {
        self.package_repo.list_active().await
    }

    /// Start a credit purchase: pending purchase + pending order + checkout
    pub async fn purchase(
        &self,
        brand_id: StringUuid,
        input: PurchaseInput,
    ) -> Result<CheckoutResponse> {
        input.validate()?;

        let package = self
            .package_repo
            .find_by_id(input.package_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此儲值方案".to_string()))?;
        if !package.is_active {
            return Err(AppError::BadRequest("此儲值方案已停售".to_string()));
        }

        let order = self
            .order_repo
            .create(&NewOrder {
                order_no: generate_order_no(),
                brand_id,
                kind: OrderKind::CreditPackage,
                item_id: package.id,
                amount: package.price,
            })
            .await?;

        self.purchase_repo
            .create_pending(brand_id, package.id, order.id, package.credits)
            .await?;

        let checkout = self
            .gateway
            .create_checkout(&order.order_no, order.amount, &package.name)
            .await?;

        info!(order_no = %order.order_no, brand_id = %brand_id, "credit purchase checkout created");

        Ok(CheckoutResponse {
            order_no: order.order_no,
            checkout_url: checkout.checkout_url,
        })
    }

    pub async fn balance(&self, brand_id: StringUuid) -> Result<CreditBalance> {
        let brand = self
            .brand_repo
            .find_by_id(brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("查無此品牌".to_string()))?;
        Ok(CreditBalance {
            balance: brand.credit_balance,
        })
    }

    pub async fn list_purchases(
        &self,
        brand_id: StringUuid,
        page: i64,
        per_page: i64,
    ) -> Result<Page<CreditPurchase>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.purchase_repo.list_by_brand(brand_id, limit, offset),
            || self.purchase_repo.count_by_brand(brand_id),
        )
        .await
    }

    // Admin package management

    pub async fn list_packages_paged(&self, page: i64, per_page: i64) -> Result<Page<CreditPackage>> {
        paginate(
            page,
            per_page,
            |limit, offset| self.package_repo.list(limit, offset),
            || self.package_repo.count(),
        )
        .await
    }

    pub async fn create_package(&self, input: CreateCreditPackageInput) -> Result<CreditPackage> {
        input.validate()?;
        self.package_repo.create(&input).await
    }

    pub async fn update_package(
        &self,
        id: StringUuid,
        input: UpdateCreditPackageInput,
    ) -> Result<CreditPackage> {
        input.validate()?;
        self.package_repo.update(id, &input).await
    }

    pub async fn remove_package(&self, id: StringUuid) -> Result<()> {
        self.package_repo.deactivate(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentConfig;
    use crate::domain::{Brand, Order};
    use crate::repository::brand::MockBrandRepository;
    use crate::repository::credit_package::MockCreditPackageRepository;
    use crate::repository::credit_purchase::MockCreditPurchaseRepository;
    use crate::repository::order::MockOrderRepository;
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

    #[tokio::test]
    async fn test_purchase_creates_order_then_purchase() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "checkout_url": "https://pay.example.com/c/credit",
                "provider_ref": "TX-2"
            })))
            .mount(&server)
            .await;

        let brand_id = StringUuid::new_v4();
        let package = CreditPackage {
            credits: 500,
            price: 450,
            ..Default::default()
        };
        let package_id = package.id;

        let mut package_repo = MockCreditPackageRepository::new();
        package_repo
            .expect_find_by_id()
            .with(eq(package_id))
            .returning(move |_| Ok(Some(package.clone())));

        let mut order_repo = MockOrderRepository::new();
        order_repo.expect_create().returning(|input| {
            assert_eq!(input.kind, OrderKind::CreditPackage);
            assert_eq!(input.amount, 450);
            Ok(Order {
                order_no: input.order_no.clone(),
                brand_id: input.brand_id,
                kind: input.kind,
                item_id: input.item_id,
                amount: input.amount,
                ..Default::default()
            })
        });

        let mut purchase_repo = MockCreditPurchaseRepository::new();
        purchase_repo
            .expect_create_pending()
            .withf(move |b, p, _, credits| *b == brand_id && *p == package_id && *credits == 500)
            .returning(|brand_id, package_id, order_id, credits| {
                Ok(CreditPurchase {
                    brand_id,
                    package_id,
                    order_id,
                    credits,
                    ..Default::default()
                })
            });

        let service = CreditService::new(
            Arc::new(package_repo),
            Arc::new(purchase_repo),
            Arc::new(order_repo),
            Arc::new(MockBrandRepository::new()),
            gateway(&server.uri()),
        );

        let checkout = service
            .purchase(brand_id, PurchaseInput { package_id })
            .await
            .unwrap();

        assert_eq!(checkout.checkout_url, "https://pay.example.com/c/credit");
    }

    #[tokio::test]
    async fn test_purchase_inactive_package_rejected() {
        let mut package_repo = MockCreditPackageRepository::new();
        let package = CreditPackage {
            is_active: false,
            ..Default::default()
        };
        let package_id = package.id;
        package_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(package.clone())));

        let service = CreditService::new(
            Arc::new(package_repo),
            Arc::new(MockCreditPurchaseRepository::new()),
            Arc::new(MockOrderRepository::new()),
            Arc::new(MockBrandRepository::new()),
            gateway("http://localhost:9000"),
        );

        let result = service
            .purchase(StringUuid::new_v4(), PurchaseInput { package_id })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_balance_reads_brand() {
        let mut brand_repo = MockBrandRepository::new();
        let brand = Brand {
            credit_balance: 720,
            ..Default::default()
        };
        let brand_id = brand.id;
        brand_repo
            .expect_find_by_id()
            .with(eq(brand_id))
            .returning(move |_| Ok(Some(brand.clone())));

        let service = CreditService::new(
            Arc::new(MockCreditPackageRepository::new()),
            Arc::new(MockCreditPurchaseRepository::new()),
            Arc::new(MockOrderRepository::new()),
            Arc::new(brand_repo),
            gateway("http://localhost:9000"),
        );

        let balance = service.balance(brand_id).await.unwrap();
        assert_eq!(balance.balance, 720);
    }
}
