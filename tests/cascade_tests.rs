//! Borrados en cascada: empresa → flota completa, vehículo/conductor → sus
//! archivos, y retirada de los bytes almacenados.

mod common;

use serde_json::json;

use fleet_records::models::file::OwnerKind;
use fleet_records::storage::StorageBackend;
use fleet_records::utils::errors::AppError;

#[tokio::test]
async fn test_delete_company_cascades_to_fleet_and_files() {
    let Some(pool) = common::try_pool().await else {
        eprintln!("skipping: TEST_DATABASE_URL not configured");
        return;
    };
    let storage = common::temp_storage().await;

    let company = common::create_company(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("C"), "name": "Haulage Ltd" }),
    )
    .await;
    let vehicle_a = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V"), "company_id": company.id }),
    )
    .await;
    let vehicle_b = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V"), "company_id": company.id }),
    )
    .await;
    let driver = common::create_driver(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("D"), "company_id": company.id }),
    )
    .await;

    let company_file = common::files(&pool, &storage)
        .attach(OwnerKind::Company, company.id, common::upload("contract.pdf", b"c-bytes", None))
        .await
        .unwrap();
    let vehicle_file = common::files(&pool, &storage)
        .attach(OwnerKind::Vehicle, vehicle_a.id, common::upload("insurance.pdf", b"v-bytes", None))
        .await
        .unwrap();
    let driver_file = common::files(&pool, &storage)
        .attach(OwnerKind::Driver, driver.id, common::upload("license.jpg", b"d-bytes", None))
        .await
        .unwrap();

    common::companies(&pool, &storage).delete(company.id).await.unwrap();

    // Todas las filas de la flota han desaparecido
    assert!(matches!(
        common::companies(&pool, &storage).get_by_id(company.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    for vehicle_id in [vehicle_a.id, vehicle_b.id] {
        assert!(matches!(
            common::vehicles(&pool, &storage).get_by_id(vehicle_id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
    assert!(matches!(
        common::drivers(&pool, &storage).get_by_id(driver.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    // Sin archivos huérfanos, ni en metadatos ni en disco
    for file in [&company_file, &vehicle_file, &driver_file] {
        assert!(matches!(
            common::files(&pool, &storage).get_by_id(file.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            storage.read(&file.file_url).await.unwrap_err(),
            AppError::ResourceMissing(_)
        ));
    }
}

#[tokio::test]
async fn test_delete_company_detaches_driver_from_foreign_vehicle() {
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
    let driver = common::create_driver(
        &pool,
        &storage,
        json!({ "identity_card": common::unique("D"), "company_id": company.id }),
    )
    .await;
    // Vehículo sin empresa, conducido por un conductor de la empresa
    let vehicle = common::create_vehicle(
        &pool,
        &storage,
        json!({ "license_plate": common::unique("V"), "assigned_driver_id": driver.id }),
    )
    .await;

    common::companies(&pool, &storage).delete(company.id).await.unwrap();

    // El vehículo ajeno sobrevive con el puntero limpio
    let after = common::vehicles(&pool, &storage).get_by_id(vehicle.id).await.unwrap();
    assert_eq!(after.assigned_driver_id, None);
}

#[tokio::test]
async fn test_delete_vehicle_cascades_files_but_not_driver() {
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
        json!({ "license_plate": common::unique("V"), "assigned_driver_id": driver.id }),
    )
    .await;
    let file = common::files(&pool, &storage)
        .attach(OwnerKind::Vehicle, vehicle.id, common::upload("mot.pdf", b"bytes", None))
        .await
        .unwrap();

    common::vehicles(&pool, &storage).delete(vehicle.id).await.unwrap();

    assert!(matches!(
        common::vehicles(&pool, &storage).get_by_id(vehicle.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        common::files(&pool, &storage).get_by_id(file.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        storage.read(&file.file_url).await.unwrap_err(),
        AppError::ResourceMissing(_)
    ));

    // El conductor asignado no se borra con el vehículo
    let survivor = common::drivers(&pool, &storage).get_by_id(driver.id).await.unwrap();
    assert_eq!(survivor.vehicle_id, None);
}

#[tokio::test]
async fn test_delete_driver_cascades_files() {
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
    let file = common::files(&pool, &storage)
        .attach(OwnerKind::Driver, driver.id, common::upload("medical.pdf", b"bytes", None))
        .await
        .unwrap();

    common::drivers(&pool, &storage).delete(driver.id).await.unwrap();

    assert!(matches!(
        common::files(&pool, &storage).get_by_id(file.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        storage.read(&file.file_url).await.unwrap_err(),
        AppError::ResourceMissing(_)
    ));
}

#[tokio::test]
async fn test_delete_file_removes_bytes_and_row() {
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
    let file = common::files(&pool, &storage)
        .attach(OwnerKind::Company, company.id, common::upload("doc.txt", b"bytes", None))
        .await
        .unwrap();

    common::files(&pool, &storage).delete(file.id).await.unwrap();

    assert!(matches!(
        common::files(&pool, &storage).get_by_id(file.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        storage.read(&file.file_url).await.unwrap_err(),
        AppError::ResourceMissing(_)
    ));
}

#[tokio::test]
async fn test_delete_file_tolerates_missing_bytes() {
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
    let file = common::files(&pool, &storage)
        .attach(OwnerKind::Company, company.id, common::upload("doc.txt", b"bytes", None))
        .await
        .unwrap();

    // Los bytes desaparecen por fuera; el borrado de metadatos debe funcionar igual
    storage.remove(&file.file_url).await.unwrap();
    common::files(&pool, &storage).delete(file.id).await.unwrap();

    assert!(matches!(
        common::files(&pool, &storage).get_by_id(file.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
