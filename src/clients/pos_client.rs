use crate::automation::TickReport;
use crate::floor::FloorStats;
use crate::model::{
    CatalogItem, CatalogItemCreate, CatalogItemId, CatalogItemUpdate, Order, OrderId,
    OrderStatus, PaymentMethod, TableId, TableStatus,
};
use crate::store::{PosCommand, PosError, PosReply, PosStore};
use async_trait::async_trait;
use tick_actor::{ActorClient, StateClient};
use tracing::{debug, instrument};

/// Client for interacting with the POS store actor.
///
/// Each method sends one command and unwraps the matching reply variant.
#[derive(Clone)]
pub struct PosClient {
    inner: StateClient<PosStore>,
}

impl PosClient {
    pub fn new(inner: StateClient<PosStore>) -> Self {
        Self { inner }
    }

    async fn send(&self, command: PosCommand) -> Result<(&'static str, PosReply), PosError> {
        let name = command.name();
        debug!(command = name, "Sending request");
        let reply = self.inner.request(command).await?;
        Ok((name, reply))
    }

    fn unexpected(command: &'static str, reply: PosReply) -> PosError {
        PosError::UnexpectedReply {
            command,
            reply: format!("{:?}", reply),
        }
    }

    /// Runs one driver pass right now, outside the timer.
    #[instrument(skip(self))]
    pub async fn tick(&self) -> Result<TickReport, PosError> {
        match self.send(PosCommand::Tick).await? {
            (_, PosReply::Ticked(report)) => Ok(report),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        table: TableId,
        picks: Vec<(CatalogItemId, u32)>,
    ) -> Result<OrderId, PosError> {
        match self.send(PosCommand::PlaceOrder { table, picks }).await? {
            (_, PosReply::OrderPlaced(id)) => Ok(id),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    /// Replaces the items of an open order; the order keeps its id and status.
    #[instrument(skip(self))]
    pub async fn amend_order(
        &self,
        order: OrderId,
        picks: Vec<(CatalogItemId, u32)>,
    ) -> Result<Order, PosError> {
        match self.send(PosCommand::AmendOrder { order, picks }).await? {
            (_, PosReply::Amended(order)) => Ok(order),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn advance_order(&self, order: OrderId) -> Result<OrderStatus, PosError> {
        match self.send(PosCommand::AdvanceOrder(order)).await? {
            (_, PosReply::Status(status)) => Ok(status),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn settle_order(
        &self,
        order: OrderId,
        method: PaymentMethod,
    ) -> Result<Order, PosError> {
        match self.send(PosCommand::SettleOrder { order, method }).await? {
            (_, PosReply::Settled(order)) => Ok(order),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order: OrderId) -> Result<(), PosError> {
        self.expect_done(PosCommand::CancelOrder(order)).await
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn add_catalog_item(
        &self,
        params: CatalogItemCreate,
    ) -> Result<CatalogItemId, PosError> {
        match self.send(PosCommand::AddCatalogItem(params)).await? {
            (_, PosReply::ItemAdded(id)) => Ok(id),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update_catalog_item(
        &self,
        id: CatalogItemId,
        update: CatalogItemUpdate,
    ) -> Result<CatalogItem, PosError> {
        match self.send(PosCommand::UpdateCatalogItem { id, update }).await? {
            (_, PosReply::Item(item)) => Ok(item),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_catalog_item(&self, id: CatalogItemId) -> Result<CatalogItem, PosError> {
        match self.send(PosCommand::RemoveCatalogItem(id)).await? {
            (_, PosReply::Item(item)) => Ok(item),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_table(&self, number: u32, capacity: u32) -> Result<TableId, PosError> {
        match self.send(PosCommand::AddTable { number, capacity }).await? {
            (_, PosReply::TableAdded(id)) => Ok(id),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_maintenance(&self, table: TableId, on: bool) -> Result<TableStatus, PosError> {
        match self.send(PosCommand::SetMaintenance { table, on }).await? {
            (_, PosReply::Table(status)) => Ok(status),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_auto_settle(&self, on: bool) -> Result<(), PosError> {
        self.expect_done(PosCommand::SetAutoSettle(on)).await
    }

    #[instrument(skip(self, message))]
    pub async fn note(&self, message: impl Into<String>) -> Result<(), PosError> {
        self.expect_done(PosCommand::Note(message.into())).await
    }

    #[instrument(skip(self))]
    pub async fn clear_log(&self) -> Result<(), PosError> {
        self.expect_done(PosCommand::ClearLog).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<FloorStats, PosError> {
        match self.send(PosCommand::Stats).await? {
            (_, PosReply::Stats(stats)) => Ok(stats),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }

    async fn expect_done(&self, command: PosCommand) -> Result<(), PosError> {
        match self.send(command).await? {
            (_, PosReply::Done) => Ok(()),
            (name, other) => Err(Self::unexpected(name, other)),
        }
    }
}

#[async_trait]
impl ActorClient<PosStore> for PosClient {
    fn inner(&self) -> &StateClient<PosStore> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tick_actor::mock::{create_mock_client, expect_command, expect_snapshot};
    use tick_actor::FrameworkError;

    #[tokio::test]
    async fn test_advance_order_unwraps_status() {
        let (client, mut receiver) = create_mock_client::<PosStore>(10);
        let pos = PosClient::new(client);

        let task = tokio::spawn(async move { pos.advance_order(OrderId(3)).await });

        let (command, responder) = expect_command(&mut receiver).await.unwrap();
        assert!(matches!(command, PosCommand::AdvanceOrder(OrderId(3))));
        responder
            .send(Ok(PosReply::Status(OrderStatus::Preparing)))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(OrderStatus::Preparing));
    }

    #[tokio::test]
    async fn test_wrong_reply_is_reported() {
        let (client, mut receiver) = create_mock_client::<PosStore>(10);
        let pos = PosClient::new(client);

        let task = tokio::spawn(async move { pos.stats().await });

        let (_, responder) = expect_command(&mut receiver).await.unwrap();
        responder.send(Ok(PosReply::Done)).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(PosError::UnexpectedReply {
                command: "stats",
                reply: "Done".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_dropped_responder_maps_to_framework_error() {
        let (client, mut receiver) = create_mock_client::<PosStore>(10);
        let pos = PosClient::new(client);

        let task = tokio::spawn(async move { pos.clear_log().await });

        let (command, responder) = expect_command(&mut receiver).await.unwrap();
        assert!(matches!(command, PosCommand::ClearLog));
        drop(responder);

        assert_eq!(
            task.await.unwrap(),
            Err(PosError::Framework(FrameworkError::ActorDropped))
        );
    }

    #[tokio::test]
    async fn test_snapshot_goes_through_trait() {
        let (client, mut receiver) = create_mock_client::<PosStore>(10);
        let pos = PosClient::new(client);

        let task = tokio::spawn(async move { pos.snapshot().await });
        let responder = expect_snapshot(&mut receiver).await.unwrap();
        drop(responder);

        assert!(matches!(
            task.await.unwrap(),
            Err(PosError::Framework(FrameworkError::ActorDropped))
        ));
    }
}
