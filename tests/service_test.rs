//! Service unit tests over mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use landra::config::Config;
use landra::domain::{
    CreateLease, CreateTenant, Lease, LeaseStatus, Password, Payment, PaymentMethod,
    PaymentStatus, Property, PropertyInput, RecordPayment, Tenant, User,
};
use landra::errors::{AppError, AppResult};
use landra::infra::repositories::{
    MockLeaseRepository, MockPaymentRepository, MockPropertyRepository, MockTenantRepository,
    MockUnitRepository, MockUserRepository,
};
use landra::infra::{
    LeaseRepository, PaymentRepository, PropertyRepository, TenantRepository, TransactionContext,
    TxFuture, UnitOfWork, UnitRepository, UserRepository,
};
use landra::services::{
    AuthService, Authenticator, LeaseManager, LeaseService, PaymentManager, PaymentService,
    PropertyManager, PropertyService, TenantManager, TenantService,
};
use landra::types::PaginationParams;

/// Mocked repositories, configured before being frozen into a unit of work.
#[derive(Default)]
struct MockRepos {
    users: MockUserRepository,
    properties: MockPropertyRepository,
    units: MockUnitRepository,
    tenants: MockTenantRepository,
    leases: MockLeaseRepository,
    payments: MockPaymentRepository,
}

/// Test UnitOfWork over mocked repositories; transactions are unavailable.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    properties: Arc<MockPropertyRepository>,
    units: Arc<MockUnitRepository>,
    tenants: Arc<MockTenantRepository>,
    leases: Arc<MockLeaseRepository>,
    payments: Arc<MockPaymentRepository>,
}

impl MockRepos {
    fn build(self) -> Arc<TestUnitOfWork> {
        Arc::new(TestUnitOfWork {
            users: Arc::new(self.users),
            properties: Arc::new(self.properties),
            units: Arc::new(self.units),
            tenants: Arc::new(self.tenants),
            leases: Arc::new(self.leases),
            payments: Arc::new(self.payments),
        })
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn properties(&self) -> Arc<dyn PropertyRepository> {
        self.properties.clone()
    }

    fn units(&self) -> Arc<dyn UnitRepository> {
        self.units.clone()
    }

    fn tenants(&self) -> Arc<dyn TenantRepository> {
        self.tenants.clone()
    }

    fn leases(&self) -> Arc<dyn LeaseRepository> {
        self.leases.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_snapshot<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_property(id: Uuid, owner_id: Uuid) -> Property {
    Property {
        id,
        owner_id,
        name: "Sampaguita Apartments".into(),
        address: "123 Rizal Ave".into(),
        description: None,
        total_units: 4,
        amenities: vec![],
        images: vec![],
        rules: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_tenant(id: Uuid, property_id: Uuid) -> Tenant {
    Tenant {
        id,
        property_id,
        first_name: "Juan".into(),
        last_name: "dela Cruz".into(),
        email: "juan@example.ph".into(),
        phone: "09175550101".into(),
        emergency_contact: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_lease(id: Uuid) -> Lease {
    Lease {
        id,
        unit_id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        monthly_rent: Decimal::new(1500000, 2),
        deposit_paid: Decimal::ZERO,
        advance_paid: Decimal::ZERO,
        due_date: 5,
        status: LeaseStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_payment(id: Uuid, lease_id: Uuid, status: PaymentStatus) -> Payment {
    Payment {
        id,
        lease_id,
        amount: Decimal::new(1500000, 2),
        payment_method: PaymentMethod::Gcash,
        payment_date: date(2024, 2, 3),
        due_date: date(2024, 2, 5),
        reference_number: None,
        status,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_user(email: &str, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.into(),
        password_hash: Password::new(password).unwrap().into_string(),
        name: "Maria Santos".into(),
        phone: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_config() -> Config {
    Config::for_database("postgres://unused", "test-session-secret-with-at-least-32-chars")
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn test_get_property_not_owned() {
    let mut uow = MockRepos::default();
    uow.properties
        .expect_find_owned()
        .returning(|_, _| Ok(None));

    let service = PropertyManager::new(uow.build());
    let err = service
        .get_property(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Property")));
    assert_eq!(err.to_string(), "Property not found or unauthorized");
}

#[tokio::test]
async fn test_create_property_trims_input() {
    let owner_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.properties
        .expect_create()
        .withf(|_, input| input.name == "Sampaguita" && input.amenities == vec!["wifi".to_string()])
        .returning(|owner_id, _| Ok(test_property(Uuid::new_v4(), owner_id)));

    let service = PropertyManager::new(uow.build());
    let property = service
        .create_property(
            owner_id,
            PropertyInput {
                name: "  Sampaguita ".into(),
                address: "123 Rizal Ave".into(),
                description: None,
                total_units: 4,
                amenities: vec![" wifi ".into(), "  ".into()],
                images: vec![],
                rules: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(property.owner_id, owner_id);
}

#[tokio::test]
async fn test_delete_property_not_owned() {
    let mut uow = MockRepos::default();
    uow.properties
        .expect_delete_owned()
        .returning(|_, _| Ok(false));

    let service = PropertyManager::new(uow.build());
    let err = service
        .delete_property(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Property")));
}

// =============================================================================
// Tenants
// =============================================================================

fn create_tenant_input(property_id: Uuid) -> CreateTenant {
    CreateTenant {
        property_id,
        first_name: "Juan".into(),
        last_name: "dela Cruz".into(),
        email: "juan@example.ph".into(),
        phone: "09175550101".into(),
        emergency_contact: None,
    }
}

#[tokio::test]
async fn test_create_tenant_duplicate_email() {
    let owner_id = Uuid::new_v4();
    let property_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.properties
        .expect_find_owned()
        .with(eq(property_id), eq(owner_id))
        .returning(|id, owner| Ok(Some(test_property(id, owner))));
    uow.tenants
        .expect_email_taken()
        .returning(|_, _, _| Ok(true));
    uow.tenants.expect_create().never();

    let service = TenantManager::new(uow.build());
    let err = service
        .create_tenant(owner_id, create_tenant_input(property_id))
        .await
        .unwrap_err();

    match err {
        AppError::Conflict(msg) => {
            assert_eq!(msg, "A tenant with this email already exists in your properties")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_tenant_foreign_property() {
    let mut uow = MockRepos::default();
    uow.properties
        .expect_find_owned()
        .returning(|_, _| Ok(None));
    uow.tenants.expect_create().never();

    let service = TenantManager::new(uow.build());
    let err = service
        .create_tenant(Uuid::new_v4(), create_tenant_input(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Property")));
}

#[tokio::test]
async fn test_delete_tenant_with_active_lease() {
    let tenant_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.tenants
        .expect_find_owned()
        .returning(|id, _| Ok(Some(test_tenant(id, Uuid::new_v4()))));
    uow.tenants
        .expect_has_active_lease()
        .with(eq(tenant_id))
        .returning(|_| Ok(true));
    uow.tenants.expect_delete().never();

    let service = TenantManager::new(uow.build());
    let err = service
        .delete_tenant(Uuid::new_v4(), tenant_id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Tenant has an active lease"));
}

// =============================================================================
// Leases
// =============================================================================

#[tokio::test]
async fn test_create_lease_validates_before_transaction() {
    let service = LeaseManager::new(MockRepos::default().build());

    let err = service
        .create_lease(
            Uuid::new_v4(),
            CreateLease {
                unit_id: Uuid::new_v4().to_string(),
                tenant_id: Uuid::new_v4().to_string(),
                start_date: "2024-12-31".into(),
                end_date: "2024-01-01".into(),
                monthly_rent: 15000.into(),
                deposit_paid: 0.into(),
                advance_paid: 0.into(),
                due_date: 5.into(),
                status: None,
            },
        )
        .await
        .unwrap_err();

    // A validation failure never reaches the (unsupported) transaction
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_expiring_window_bounds() {
    let mut uow = MockRepos::default();
    uow.leases
        .expect_list_expiring()
        .times(1)
        .returning(|_, _, _| Ok(vec![]));

    let service = LeaseManager::new(uow.build());
    let owner_id = Uuid::new_v4();

    assert!(matches!(
        service.list_expiring_leases(owner_id, 0).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.list_expiring_leases(owner_id, 366).await,
        Err(AppError::Validation(_))
    ));
    assert!(service.list_expiring_leases(owner_id, 60).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_lease_not_owned() {
    let mut uow = MockRepos::default();
    uow.leases
        .expect_find_summary()
        .returning(|_, _| Ok(None));

    let service = LeaseManager::new(uow.build());
    let err = service
        .get_lease(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Lease")));
}

// =============================================================================
// Payments
// =============================================================================

#[tokio::test]
async fn test_record_payment_defaults_due_date() {
    let owner_id = Uuid::new_v4();
    let lease_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.leases
        .expect_find_owned()
        .with(eq(lease_id), eq(owner_id))
        .returning(|id, _| Ok(Some(test_lease(id))));
    uow.payments
        .expect_create()
        .withf(|p| p.due_date == NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        .returning(|p| {
            Ok(Payment {
                due_date: p.due_date,
                ..test_payment(Uuid::new_v4(), p.lease_id, p.status)
            })
        });

    let service = PaymentManager::new(uow.build());
    let payment = service
        .record_payment(
            owner_id,
            RecordPayment {
                lease_id,
                amount: Decimal::from(15000),
                payment_method: PaymentMethod::Cash,
                payment_date: "2024-02-06".into(),
                due_date: None,
                reference_number: None,
                status: PaymentStatus::Pending,
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(payment.lease_id, lease_id);
    assert_eq!(payment.due_date, date(2024, 3, 5));
}

#[tokio::test]
async fn test_record_payment_foreign_lease() {
    let mut uow = MockRepos::default();
    uow.leases
        .expect_find_owned()
        .returning(|_, _| Ok(None));
    uow.payments.expect_create().never();

    let service = PaymentManager::new(uow.build());
    let err = service
        .record_payment(
            Uuid::new_v4(),
            RecordPayment {
                lease_id: Uuid::new_v4(),
                amount: Decimal::from(15000),
                payment_method: PaymentMethod::Gcash,
                payment_date: "2024-02-06".into(),
                due_date: None,
                reference_number: None,
                status: PaymentStatus::Pending,
                notes: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFoundOrUnauthorized("Lease")));
}

#[tokio::test]
async fn test_list_payments_paginates() {
    let owner_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.payments
        .expect_list_by_owner()
        .with(eq(owner_id), eq(20u64), eq(10u64))
        .returning(|_, _, _| {
            let lease_id = Uuid::new_v4();
            Ok((
                vec![test_payment(Uuid::new_v4(), lease_id, PaymentStatus::Confirmed)],
                21,
            ))
        });

    let service = PaymentManager::new(uow.build());
    let page = service
        .list_payments(
            owner_id,
            PaginationParams {
                page: 3,
                per_page: 10,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.page, 3);
    assert_eq!(page.meta.total, 21);
    assert_eq!(page.meta.total_pages, 3);
}

#[tokio::test]
async fn test_update_payment_status() {
    let payment_id = Uuid::new_v4();

    let mut uow = MockRepos::default();
    uow.payments
        .expect_find_owned()
        .returning(|id, _| Ok(Some(test_payment(id, Uuid::new_v4(), PaymentStatus::Pending))));
    uow.payments
        .expect_update_status()
        .with(eq(payment_id), eq(PaymentStatus::Confirmed))
        .returning(|id, status| Ok(test_payment(id, Uuid::new_v4(), status)));

    let service = PaymentManager::new(uow.build());
    let payment = service
        .update_status(Uuid::new_v4(), payment_id, PaymentStatus::Confirmed)
        .await
        .unwrap();

    assert_eq!(payment.status, PaymentStatus::Confirmed);
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_register_duplicate_email() {
    let mut uow = MockRepos::default();
    uow.users
        .expect_find_by_email()
        .withf(|email| email == "maria@example.ph")
        .returning(|email| Ok(Some(test_user(email, "kalamansi"))));
    uow.users.expect_create().never();

    let service = Authenticator::new(uow.build(), test_config());
    let err = service
        .register(
            " Maria@Example.ph ".into(),
            "kalamansi".into(),
            "Maria".into(),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "User with this email already exists"));
}

#[tokio::test]
async fn test_login_round_trip() {
    let user = test_user("maria@example.ph", "kalamansi");
    let user_id = user.id;

    let mut uow = MockRepos::default();
    uow.users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    let service = Authenticator::new(uow.build(), test_config());

    let session = service
        .login("maria@example.ph".into(), "kalamansi".into())
        .await
        .unwrap();
    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.expires_in, 24 * 3600);

    let claims = service.verify_token(&session.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.name, "Maria Santos");

    let err = service
        .login("maria@example.ph".into(), "wrong-password".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut uow = MockRepos::default();
    uow.users
        .expect_find_by_email()
        .returning(|_| Ok(None));

    let service = Authenticator::new(uow.build(), test_config());
    let err = service
        .login("ghost@example.ph".into(), "kalamansi".into())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let service = Authenticator::new(MockRepos::default().build(), test_config());
    assert!(service.verify_token("not.a.jwt").is_err());
}
