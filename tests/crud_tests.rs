//! CRUD: unicidad de claves naturales, validación de referencias, semántica
//! de actualización parcial y round-trip de fechas.

mod common;

use chrono::NaiveDate;
use serde_json::json;

use fleet_records::utils::errors::AppError;

#[tokio::test]
async fn test_duplicate_identity_card_rejected() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;
    let identity = common::unique("C");

    let original = common::create_company(
        &pool,
        &storage,
        json!({ "identity_card": identity, "name": "First" }),
    )
    .await;

    let err = common::companies(&pool, &storage)
        .create(serde_json::from_value(json!({ "identity_card": identity, "name": "Second" })).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));

    // La primera fila queda intacta
    let kept = common::companies(&pool, &storage).get_by_id(original.id).await.unwrap();
    assert_eq!(kept.name.as_deref(), Some("First"));
}

#[tokio::test]
async fn test_duplicate_license_plate_on_update_rejected() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let first = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;
    let second = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;

    let err = common::vehicles(&pool, &storage)
        .update(
            second.id,
            serde_json::from_value(json!({ "license_plate": first.license_plate })).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_natural_key_update_to_same_value_passes() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let driver = common::create_driver(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("D") }),
    )
    .await;

    // Reescribir la misma clave natural no es un conflicto
    let updated = common::drivers(&pool, &storage)
        .update(
            driver.id,
            serde_json::from_value(json!({ "identity_card": driver.identity_card })).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(updated.identity_card, driver.identity_card);
}

#[tokio::test]
async fn test_company_ref_validated_on_create() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let err = common::vehicles(&pool, &storage)
        .create(
            serde_json::from_value(json!({
                "license_plate": common::unique("V"),
                "company_id": 999_999_999
            }))
            .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CompanyNotFound(_)));

    let err = common::drivers(&pool, &storage)
        .create(
            serde_json::from_value(json!({
                "identity_card": common::unique("D"),
                "company_id": 999_999_999
            }))
            .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CompanyNotFound(_)));
}

#[tokio::test]
async fn test_patch_semantics_absent_null_and_garbage_dates() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let company = common::create_company(
        &pool,
        &storage,
        json!({
            "identity_card": common::unique("C"),
            "notes": "keep me",
            "po_box": "41",
            "established_date": "1999-12-01"
        }),
    )
    .await;
    assert_eq!(company.established_date, NaiveDate::from_ymd_opt(1999, 12, 1));

    // null limpia, ausente conserva
    let updated = common::companies(&pool, &storage)
        .update(
            company.id,
            serde_json::from_value(json!({ "notes": null })).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(updated.notes, None);
    assert_eq!(updated.po_box.as_deref(), Some("41"));

    // Una fecha no parseable se degrada a NULL en vez de fallar
    let updated = common::companies(&pool, &storage)
        .update(
            company.id,
            serde_json::from_value(json!({ "established_date": "not-a-date" })).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(updated.established_date, None);
}

#[tokio::test]
async fn test_create_read_round_trip_with_dates() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({
            "license_plate": common::unique("V"),
            "manufacturer": "MAN",
            "model": "TGX",
            "weight": 18000,
            "production_year": 2021,
            "license_expiry_date": "2025-06-30T00:00:00Z",
            "next_safety_inspection": "2024-11-02",
            "has_tow_hook": true,
            "notes": "round trip"
        }),
    )
    .await;

    let read = common::vehicles(&pool, &storage).get_by_id(vehicle.id).await.unwrap();
    assert_eq!(read.license_plate, vehicle.license_plate);
    assert_eq!(read.manufacturer.as_deref(), Some("MAN"));
    assert_eq!(read.model.as_deref(), Some("TGX"));
    assert_eq!(read.weight, Some(18000));
    assert_eq!(read.production_year, Some(2021));
    assert_eq!(read.license_expiry_date, NaiveDate::from_ymd_opt(2025, 6, 30));
    assert_eq!(read.next_safety_inspection, NaiveDate::from_ymd_opt(2024, 11, 2));
    assert_eq!(read.has_tow_hook, Some(true));
    assert_eq!(read.is_operational, Some(true));
    assert_eq!(read.notes.as_deref(), Some("round trip"));
}

#[tokio::test]
async fn test_company_counts_reflect_fleet() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let company = common::create_company(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("C") }),
    )
    .await;
    assert_eq!(company.vehicles_count, 0);
    assert_eq!(company.drivers_count, 0);

    common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V"), "company_id": company.id }),
    )
    .await;
    common::create_driver(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("D"), "company_id": company.id }),
    )
    .await;

    let read = common::companies(&pool, &storage).get_by_id(company.id).await.unwrap();
    assert_eq!(read.vehicles_count, 1);
    assert_eq!(read.drivers_count, 1);

    let fleet = common::companies(&pool, &storage).list_vehicles(company.id).await.unwrap();
    assert_eq!(fleet.len(), 1);
    assert_eq!(fleet[0].company_id, Some(company.id));
}

#[tokio::test]
async fn test_unknown_ids_return_not_found() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    assert!(matches!(
        common::companies(&pool, &storage).get_by_id(999_999_999).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        common::vehicles(&pool, &storage).delete(999_999_999).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        common::drivers(&pool, &storage)
            .update(999_999_999, Default::default())
            .await
            .unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        common::files(&pool, &storage).get_by_id(999_999_999).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let company = common::create_company(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("C1") }),
    )
    .await;
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V1"), "company_id": company.id }),
    )
    .await;
    let driver = common::create_driver(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("D1"), "company_id": company.id }),
    )
    .await;

    let assigned = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();
    assert_eq!(assigned.assigned_driver_id, Some(driver.id));

    let released = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, None)
        .await
        .unwrap();
    assert_eq!(released.assigned_driver_id, None);

    common::companies(&pool, &storage).delete(company.id).await.unwrap();

    assert!(matches!(
        common::vehicles(&pool, &storage).get_by_id(vehicle.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        common::drivers(&pool, &storage).get_by_id(driver.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
