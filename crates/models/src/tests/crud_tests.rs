use crate::db::{connect_with_config, sqlite_memory_config};
use crate::{car, errors::ModelError};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use anyhow::Result;
use migration::MigratorTrait;

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&sqlite_memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_car_create_assigns_id_and_trims() -> Result<()> {
    let db = setup_test_db().await?;

    let first = car::create(&db, 1, " Toyota ", "Corolla", 2020, 5).await?;
    let second = car::create(&db, 2, "Honda", "Civic", 2019, 0).await?;

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);
    assert_eq!(first.make, "Toyota");
    assert_eq!(first.model_name, "Corolla");
    assert_eq!(first.dealer_id, 1);
    assert_eq!(first.make_key, "toyota");
    assert_eq!(first.model_key, "corolla");

    let found = car::Entity::find_by_id(first.id).one(&db).await?;
    assert_eq!(found, Some(first));
    Ok(())
}

#[tokio::test]
async fn test_car_create_rejects_invalid_input() -> Result<()> {
    let db = setup_test_db().await?;

    let err = car::create(&db, 1, "Toyota", "", 2020, 1).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    let err = car::create(&db, 1, "Toyota", "Corolla", 2020, -3).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    let rows = car::Entity::find().all(&db).await?;
    assert!(rows.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_stock_check_constraint_enforced_by_schema() -> Result<()> {
    let db = setup_test_db().await?;
    // bypasses `car::create` validation on purpose
    let am = car::ActiveModel {
        make: Set("Ford".into()),
        model_name: Set("Focus".into()),
        year: Set(2018),
        stock: Set(-1),
        dealer_id: Set(7),
        make_key: Set("ford".into()),
        model_key: Set("focus".into()),
        ..Default::default()
    };
    assert!(am.insert(&db).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_filter_by_dealer_column() -> Result<()> {
    let db = setup_test_db().await?;
    car::create(&db, 1, "Toyota", "Corolla", 2020, 5).await?;
    car::create(&db, 1, "Toyota", "Yaris", 2021, 2).await?;
    car::create(&db, 2, "Toyota", "Corolla", 2020, 9).await?;

    let dealer_one = car::Entity::find()
        .filter(car::Column::DealerId.eq(1))
        .all(&db)
        .await?;
    assert_eq!(dealer_one.len(), 2);
    assert!(dealer_one.iter().all(|c| c.dealer_id == 1));
    Ok(())
}
