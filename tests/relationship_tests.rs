//! Relación 1:1 vehículo↔conductor: asignación, reasignación, liberación
//! y el lado derivado del conductor.

mod common;

use serde_json::json;

use fleet_records::utils::errors::AppError;

#[tokio::test]
async fn test_assign_and_unassign() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let driver = common::create_driver(
        &pool,
        &storage,
        json!({
            "identity_card": common::unique("D"),
            "first_name": "Dana",
            "last_name": "Levi"
        }),
    )
    .await;
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;

    let assigned = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();
    assert_eq!(assigned.assigned_driver_id, Some(driver.id));
    assert_eq!(assigned.driver_name.as_deref(), Some("Dana Levi"));

    // El lado del conductor se deriva por búsqueda inversa
    let driver_view = common::drivers(&pool, &storage)
        .get_by_id(driver.id)
        .await
        .unwrap();
    assert_eq!(driver_view.vehicle_id, Some(vehicle.id));
    assert_eq!(driver_view.vehicle_plate.as_deref(), Some(vehicle.license_plate.as_str()));

    let released = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, None)
        .await
        .unwrap();
    assert_eq!(released.assigned_driver_id, None);
    assert_eq!(released.driver_name, None);
}

#[tokio::test]
async fn test_reassign_moves_pointer_between_vehicles() {
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

    common::vehicles(&pool, &storage)
        .assign_driver(first.id, Some(driver.id))
        .await
        .unwrap();
    let reassigned = common::vehicles(&pool, &storage)
        .assign_driver(second.id, Some(driver.id))
        .await
        .unwrap();

    assert_eq!(reassigned.assigned_driver_id, Some(driver.id));
    let first_after = common::vehicles(&pool, &storage)
        .get_by_id(first.id)
        .await
        .unwrap();
    assert_eq!(first_after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_assign_is_idempotent() {
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
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;

    let once = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();
    let twice = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();

    assert_eq!(once.assigned_driver_id, Some(driver.id));
    assert_eq!(twice.assigned_driver_id, Some(driver.id));
}

#[tokio::test]
async fn test_assign_unknown_driver_fails() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;

    let err = common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(999_999_999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DriverNotFound(_)));

    // El vehículo queda como estaba
    let after = common::vehicles(&pool, &storage)
        .get_by_id(vehicle.id)
        .await
        .unwrap();
    assert_eq!(after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_assign_unknown_vehicle_fails() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let err = common::vehicles(&pool, &storage)
        .assign_driver(999_999_999, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_deleting_driver_detaches_vehicle() {
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
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;
    common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();

    common::drivers(&pool, &storage).delete(driver.id).await.unwrap();

    let after = common::vehicles(&pool, &storage)
        .get_by_id(vehicle.id)
        .await
        .unwrap();
    assert_eq!(after.assigned_driver_id, None);

    let err = common::drivers(&pool, &storage)
        .get_by_id(driver.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_create_vehicle_with_driver_claims_assignment() {
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
    let first = common::create_vehicle(
        &pool,
        &storage,
        json!({
            "license_plate": common::unique("V"),
            "assigned_driver_id": driver.id
        }),
    )
    .await;
    assert_eq!(first.assigned_driver_id, Some(driver.id));

    // Un alta posterior con el mismo conductor se lo queda
    let second = common::create_vehicle(
        &pool,
        &storage,
        json!({
            "license_plate": common::unique("V"),
            "assigned_driver_id": driver.id
        }),
    )
    .await;
    assert_eq!(second.assigned_driver_id, Some(driver.id));

    let first_after = common::vehicles(&pool, &storage)
        .get_by_id(first.id)
        .await
        .unwrap();
    assert_eq!(first_after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_update_with_driver_claims_assignment() {
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

    common::vehicles(&pool, &storage)
        .assign_driver(first.id, Some(driver.id))
        .await
        .unwrap();

    let updated = common::vehicles(&pool, &storage)
        .update(
            second.id,
            serde_json::from_value(json!({ "assigned_driver_id": driver.id })).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(updated.assigned_driver_id, Some(driver.id));

    let first_after = common::vehicles(&pool, &storage)
        .get_by_id(first.id)
        .await
        .unwrap();
    assert_eq!(first_after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_update_with_unknown_driver_leaves_vehicle_unchanged() {
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
            "manufacturer": "Volvo"
        }),
    )
    .await;

    let err = common::vehicles(&pool, &storage)
        .update(
            vehicle.id,
            serde_json::from_value(json!({
                "assigned_driver_id": 999_999_999,
                "manufacturer": "Scania"
            }))
            .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DriverNotFound(_)));

    // La operación no se aplica a medias
    let after = common::vehicles(&pool, &storage)
        .get_by_id(vehicle.id)
        .await
        .unwrap();
    assert_eq!(after.manufacturer.as_deref(), Some("Volvo"));
    assert_eq!(after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_vehicle_driver_lookup() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let driver = common::create_driver(
        &pool,
        &storage,
        json!({
            "identity_card": common::unique("D"),
            "first_name": "Noa",
            "last_name": "Peretz"
        }),
    )
    .await;
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V") }),
    )
    .await;

    let err = common::vehicles(&pool, &storage)
        .assigned_driver(vehicle.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    common::vehicles(&pool, &storage)
        .assign_driver(vehicle.id, Some(driver.id))
        .await
        .unwrap();

    let found = common::vehicles(&pool, &storage)
        .assigned_driver(vehicle.id)
        .await
        .unwrap();
    assert_eq!(found.id, driver.id);
    assert_eq!(found.full_name.as_deref(), Some("Noa Peretz"));
}
