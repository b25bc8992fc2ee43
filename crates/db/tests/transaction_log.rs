//! Integration tests for the transaction (audit) log repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use ledgerd_core::audit::{AuditAction, JournalKind};
use ledgerd_db::models::journals::CreateCashDisbursement;
use ledgerd_db::models::transaction_log::CreateTransactionLog;
use ledgerd_db::models::user::CreateUser;
use ledgerd_db::repositories::{CashDisbursementRepo, TransactionLogRepo, UserRepo};

const FAKE_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaGhhc2hoYXNoaGFzaA";

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Audit".into(),
            last_name: "User".into(),
            middle_initial: None,
            email: "audit@test.local".into(),
            password_hash: FAKE_HASH.into(),
            role: "sysadmin".into(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_disbursement(pool: &PgPool) -> i64 {
    CashDisbursementRepo::create(
        pool,
        &CreateCashDisbursement {
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            month: Some("April".into()),
            year: Some("2026".into()),
            cv_no: "CV-000042".into(),
            check_no: None,
            location_id: None,
            payee_agent_id: None,
            address: None,
            cash_account_id: None,
            particular: "Office supplies".into(),
            total_debit: Some("500.00".into()),
            total_credit: Some("500.00".into()),
            lines: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn log_for(journal_id: i64, user_id: i64, action: AuditAction) -> CreateTransactionLog {
    CreateTransactionLog {
        journal_kind: JournalKind::CashDisbursement,
        journal_id,
        action,
        remarks: "initial entry".into(),
        remarks_by: user_id,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_query_by_kind_and_journal(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let journal_id = seed_disbursement(&pool).await;

    let created = TransactionLogRepo::create(&pool, &log_for(journal_id, user_id, AuditAction::Create))
        .await
        .unwrap();
    assert_eq!(created.journal_kind, "CashDisbursementTransaction");
    assert_eq!(created.action, "CREATE");
    assert_eq!(created.remarks, "initial entry");
    assert!(!created.is_deleted);

    // Exactly that one entry comes back for the (kind, id) pair.
    let logs = TransactionLogRepo::list_by_kind_and_journal(
        &pool,
        JournalKind::CashDisbursement,
        journal_id,
    )
    .await
    .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, created.id);

    // The other kinds see nothing for this id.
    let other = TransactionLogRepo::list_by_kind_and_journal(
        &pool,
        JournalKind::GeneralJournal,
        journal_id,
    )
    .await
    .unwrap();
    assert!(other.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_by_kind_filters_on_tag(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let journal_id = seed_disbursement(&pool).await;

    TransactionLogRepo::create(&pool, &log_for(journal_id, user_id, AuditAction::Create))
        .await
        .unwrap();
    TransactionLogRepo::create(&pool, &log_for(journal_id, user_id, AuditAction::Update))
        .await
        .unwrap();

    let logs = TransactionLogRepo::list_by_kind(&pool, JournalKind::CashDisbursement)
        .await
        .unwrap();
    assert_eq!(logs.len(), 2);

    let none = TransactionLogRepo::list_by_kind(&pool, JournalKind::SalesOnAccount)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_deleted_logs_are_excluded_until_restored(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let journal_id = seed_disbursement(&pool).await;

    let log = TransactionLogRepo::create(&pool, &log_for(journal_id, user_id, AuditAction::Delete))
        .await
        .unwrap();

    let deleted = TransactionLogRepo::soft_delete(&pool, log.id).await.unwrap();
    assert!(deleted);

    assert!(TransactionLogRepo::find_by_id(&pool, log.id).await.unwrap().is_none());
    assert!(TransactionLogRepo::list(&pool).await.unwrap().is_empty());

    let trash = TransactionLogRepo::list_deleted(&pool).await.unwrap();
    assert_eq!(trash.len(), 1);

    let restored = TransactionLogRepo::restore(&pool, log.id).await.unwrap();
    assert!(restored);

    let found = TransactionLogRepo::find_by_id(&pool, log.id)
        .await
        .unwrap()
        .expect("restored log should be visible");
    assert!(found.deleted_at.is_some());
    assert!(found.restored_at.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_log_survives_journal_soft_delete(pool: PgPool) {
    // The log's polymorphic reference has no FK: deleting the journal leaves
    // the log row intact (population nulls the reference at read time).
    let user_id = seed_user(&pool).await;
    let journal_id = seed_disbursement(&pool).await;

    let log = TransactionLogRepo::create(&pool, &log_for(journal_id, user_id, AuditAction::Create))
        .await
        .unwrap();

    CashDisbursementRepo::soft_delete(&pool, journal_id).await.unwrap();

    let found = TransactionLogRepo::find_by_id(&pool, log.id).await.unwrap();
    assert!(found.is_some(), "log must remain after the journal is deleted");
}
