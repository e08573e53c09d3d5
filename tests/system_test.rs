use pos_automation::automation::AutomationConfig;
use pos_automation::config::SystemConfig;
use pos_automation::lifecycle::PosSystem;
use pos_automation::model::{
    CatalogItemCreate, Money, OrderStatus, PaymentMethod, PaymentStatus, TableStatus,
};
use std::time::Duration;
use tick_actor::ActorClient;

fn quiet_config(interval: Duration) -> SystemConfig {
    SystemConfig::default().with_automation(
        AutomationConfig::default()
            .with_interval(interval)
            .with_chances(0.0, 0.0, 0.0)
            .with_seed(1),
    )
}

/// Cashier actions against a real store actor, then a clean shutdown.
#[tokio::test]
async fn test_cashier_flow_end_to_end() {
    let config = quiet_config(Duration::from_secs(5)).with_sample_data(false);
    let system = PosSystem::new(config).expect("Failed to start system");
    let pos = &system.client;

    let item = pos
        .add_catalog_item(CatalogItemCreate::new("Soup", Money::from_cents(1000), "Mains"))
        .await
        .expect("Failed to add item");
    let table = pos.add_table(3, 4).await.expect("Failed to add table");

    let order = pos
        .place_order(table, vec![(item, 1)])
        .await
        .expect("Failed to place order");
    assert!(pos.place_order(table, vec![(item, 1)]).await.is_err());

    for expected in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Served] {
        assert_eq!(pos.advance_order(order).await, Ok(expected));
    }
    let settled = pos
        .settle_order(order, PaymentMethod::Card)
        .await
        .expect("Failed to settle");
    assert_eq!(settled.total, Money::from_cents(1000));
    assert_eq!(settled.payment_status, PaymentStatus::Paid);

    let snapshot = pos.snapshot().await.expect("Failed to snapshot");
    let table = snapshot.floor.table(table).unwrap();
    assert_eq!(table.status(), TableStatus::Available);
    assert_eq!(table.current_order_id(), None);
    assert!(snapshot.floor.audit().is_ok());

    let stats = pos.stats().await.unwrap();
    assert_eq!(stats.paid_today, 1);
    assert_eq!(stats.revenue_today, Money::from_cents(1000));

    system.shutdown().await.expect("Shutdown failed");
}

/// A rejected oversized order does not take the store down; amending still works.
#[tokio::test]
async fn test_store_survives_rejected_order_and_amends() {
    let config = quiet_config(Duration::from_secs(5)).with_sample_data(false);
    let system = PosSystem::new(config).expect("Failed to start system");
    let pos = &system.client;

    let gold = pos
        .add_catalog_item(CatalogItemCreate::new("Gold", Money::from_cents(i64::MAX), "Misc"))
        .await
        .unwrap();
    let tea = pos
        .add_catalog_item(CatalogItemCreate::new("Tea", Money::from_cents(250), "Drinks"))
        .await
        .unwrap();
    let table = pos.add_table(1, 2).await.unwrap();

    let err = pos.place_order(table, vec![(gold, 2)]).await.unwrap_err();
    assert!(err.to_string().contains("out of range"), "{}", err);
    let err = pos
        .place_order(table, vec![(tea, u32::MAX), (tea, 1)])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("out of range"), "{}", err);

    let stats = pos.stats().await.expect("Store stopped answering");
    assert_eq!(stats.active_orders, 0);
    assert_eq!(stats.available_tables, 1);

    let order = pos.place_order(table, vec![(tea, 1)]).await.unwrap();
    assert_eq!(pos.advance_order(order).await, Ok(OrderStatus::Preparing));
    let amended = pos.amend_order(order, vec![(tea, 4)]).await.unwrap();
    assert_eq!(amended.id, order);
    assert_eq!(amended.status, OrderStatus::Preparing);
    assert_eq!(amended.total, Money::from_cents(1000));
    assert!(pos.amend_order(order, vec![(gold, 2)]).await.is_err());

    let snapshot = pos.snapshot().await.unwrap();
    assert_eq!(snapshot.floor.order(order), Some(&amended));
    assert!(snapshot.floor.audit().is_ok());

    system.shutdown().await.expect("Shutdown failed");
}

/// Starting twice still yields one tick per interval.
#[tokio::test(start_paused = true)]
async fn test_double_start_runs_one_timer() {
    let mut system = PosSystem::new(quiet_config(Duration::from_secs(5))).unwrap();

    system.agent.start().await.unwrap();
    system.agent.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(15_500)).await;

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.ticks, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_pending_tick() {
    let mut system = PosSystem::new(quiet_config(Duration::from_secs(2))).unwrap();

    system.agent.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(4_500)).await;
    assert!(system.agent.stop().await.unwrap());
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(system.client.snapshot().await.unwrap().ticks, 2);
    system.shutdown().await.unwrap();
}

/// A busy dining room left running for a while never breaks the table/order pairing
/// and keeps the log bounded.
#[tokio::test(start_paused = true)]
async fn test_automated_run_keeps_floor_consistent() {
    let config = SystemConfig::default().with_automation(
        AutomationConfig::default()
            .with_interval(Duration::from_secs(2))
            .with_log_capacity(20)
            .with_seed(2024),
    );
    let mut system = PosSystem::new(config).unwrap();

    system.agent.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(601)).await;
    system.agent.stop().await.unwrap();

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.ticks, 300);
    assert!(snapshot.floor.audit().is_ok());
    assert_eq!(snapshot.log.len(), 20);
    assert!(snapshot
        .floor
        .orders()
        .iter()
        .any(|o| o.status == OrderStatus::Completed));
    assert!(snapshot
        .floor
        .orders()
        .iter()
        .all(|o| o.status != OrderStatus::Cancelled));

    system.shutdown().await.unwrap();
}

/// Same seed, same sequence of manual ticks: same floor. Systems share nothing.
#[tokio::test]
async fn test_seeded_systems_are_reproducible_and_independent() {
    let config = SystemConfig::default()
        .with_automation(AutomationConfig::default().with_seed(99));
    let a = PosSystem::new(config.clone()).unwrap();
    let b = PosSystem::new(config).unwrap();

    for _ in 0..25 {
        a.agent.tick_now().await.unwrap();
        b.agent.tick_now().await.unwrap();
    }
    let shape = |orders: &[pos_automation::model::Order]| {
        orders
            .iter()
            .map(|o| (o.id, o.table_id, o.status, o.total, o.payment_method))
            .collect::<Vec<_>>()
    };
    let floor_a = a.client.snapshot().await.unwrap().floor;
    let floor_b = b.client.snapshot().await.unwrap().floor;
    assert!(!floor_a.orders().is_empty());
    assert_eq!(shape(floor_a.orders()), shape(floor_b.orders()));

    a.client.note("only in a").await.unwrap();
    let log_b = b.client.snapshot().await.unwrap().log;
    assert!(log_b.iter().all(|e| e.message != "only in a"));

    a.shutdown().await.unwrap();
    b.shutdown().await.unwrap();
}
