//! Views wired into the write path via the fan-out publisher.

use std::sync::Arc;

use common::{MakeModel, Vin};
use domain::{
    BuyTruck, FleetService, FleetTruckStatus, InMemoryTruckInfoLookup, RemoveTruckFromYard,
    ReturnTruckFromInspection, ReturnTruckToYard, SendTruckForInspection,
};
use event_store::InMemoryEventStore;
use projections::{
    DistanceSinceLastInspectionView, FanOutPublisher, FleetStatusView, ProjectionProcessor,
};

async fn service_for(
    store: InMemoryEventStore,
    publisher: FanOutPublisher,
    vins: &[&str],
) -> FleetService<InMemoryEventStore, FanOutPublisher, InMemoryTruckInfoLookup> {
    let lookup = InMemoryTruckInfoLookup::new();
    for vin in vins {
        lookup
            .insert(Vin::new(*vin), MakeModel::new("TruckCo", "The Big One"))
            .await;
    }
    FleetService::new(store, publisher, lookup)
}

async fn run_lifecycle(
    service: &FleetService<InMemoryEventStore, FanOutPublisher, InMemoryTruckInfoLookup>,
    vin: &Vin,
) {
    service
        .buy_truck(BuyTruck {
            vin: vin.clone(),
            odometer_reading: 1000,
        })
        .await
        .unwrap();
    service
        .remove_from_yard(RemoveTruckFromYard { vin: vin.clone() })
        .await
        .unwrap();
    service
        .return_to_yard(ReturnTruckToYard {
            vin: vin.clone(),
            distance_traveled: 200,
        })
        .await
        .unwrap();
    service
        .send_for_inspection(SendTruckForInspection { vin: vin.clone() })
        .await
        .unwrap();
    service
        .return_from_inspection(ReturnTruckFromInspection {
            vin: vin.clone(),
            notes: "ok".to_string(),
            odometer_reading: 1200,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn views_stay_current_as_commands_execute() {
    let store = InMemoryEventStore::new();
    let distance_view = Arc::new(DistanceSinceLastInspectionView::new());
    let status_view = Arc::new(FleetStatusView::new());
    let publisher = FanOutPublisher::new()
        .with(distance_view.clone())
        .with(status_view.clone());
    let vin = Vin::new("test-0001");
    let service = service_for(store, publisher, &["test-0001"]).await;

    run_lifecycle(&service, &vin).await;

    // Inspection reset the accumulated 200.
    assert_eq!(distance_view.get(&vin).await, Some(0));

    let row = status_view.get(&vin).await.unwrap();
    assert_eq!(row.status, FleetTruckStatus::InYard);
    assert_eq!(row.odometer_reading, 1200);
}

#[tokio::test]
async fn distance_survives_without_an_inspection() {
    let store = InMemoryEventStore::new();
    let distance_view = Arc::new(DistanceSinceLastInspectionView::new());
    let publisher = FanOutPublisher::new().with(distance_view.clone());
    let vin = Vin::new("test-0001");
    let service = service_for(store, publisher, &["test-0001"]).await;

    service
        .buy_truck(BuyTruck {
            vin: vin.clone(),
            odometer_reading: 0,
        })
        .await
        .unwrap();
    service
        .remove_from_yard(RemoveTruckFromYard { vin: vin.clone() })
        .await
        .unwrap();
    service
        .return_to_yard(ReturnTruckToYard {
            vin: vin.clone(),
            distance_traveled: 150,
        })
        .await
        .unwrap();

    assert_eq!(distance_view.get(&vin).await, Some(150));
}

#[tokio::test]
async fn rebuild_from_the_store_matches_live_views() {
    let store = InMemoryEventStore::new();
    let live_view = Arc::new(FleetStatusView::new());
    let publisher = FanOutPublisher::new().with(live_view.clone());
    let vin = Vin::new("test-0001");
    let service = service_for(store.clone(), publisher, &["test-0001"]).await;

    run_lifecycle(&service, &vin).await;

    // A fresh view catches up from the log alone.
    let rebuilt_view = Arc::new(FleetStatusView::new());
    let mut processor = ProjectionProcessor::new(store);
    processor.register(rebuilt_view.clone());
    processor.run_catch_up().await.unwrap();

    assert_eq!(rebuilt_view.get(&vin).await, live_view.get(&vin).await);

    // Rebuilding the live view from scratch converges to the same rows.
    let mut live_processor = ProjectionProcessor::new(InMemoryEventStore::new());
    live_processor.register(live_view.clone());
    live_processor.rebuild_all().await.unwrap();
    assert!(live_view.get(&vin).await.is_none());
}

#[tokio::test]
async fn views_cover_multiple_trucks() {
    let store = InMemoryEventStore::new();
    let distance_view = Arc::new(DistanceSinceLastInspectionView::new());
    let publisher = FanOutPublisher::new().with(distance_view.clone());
    let service = service_for(store, publisher, &["test-0002", "test-0001"]).await;

    for vin in ["test-0002", "test-0001"] {
        let vin = Vin::new(vin);
        service
            .buy_truck(BuyTruck {
                vin: vin.clone(),
                odometer_reading: 0,
            })
            .await
            .unwrap();
        service
            .remove_from_yard(RemoveTruckFromYard { vin: vin.clone() })
            .await
            .unwrap();
        service
            .return_to_yard(ReturnTruckToYard {
                vin,
                distance_traveled: 100,
            })
            .await
            .unwrap();
    }

    let rows = distance_view.all().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].vin, Vin::new("test-0001"));
    assert_eq!(rows[0].distance_since_last_inspection, 100);
    assert_eq!(rows[1].vin, Vin::new("test-0002"));
}
