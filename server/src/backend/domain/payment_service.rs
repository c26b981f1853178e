//! Payment status: bulk paid/unpaid marking per participant.
use anyhow::Result;
use log::info;

use crate::backend::domain::aggregator::Aggregator;
use crate::backend::domain::commands::payments::{
    PaymentStatusResult, SetPaidCommand, TogglePaidCommand,
};
use crate::backend::domain::models::submission::SubmissionError;
use crate::backend::domain::record_store::{RecordStore, RecordStoreHandle};
use crate::backend::storage::Connection;

#[derive(Clone)]
pub struct PaymentService<C: Connection> {
    store: RecordStoreHandle<C::SubmissionRepository>,
    aggregator: Aggregator,
}

impl<C: Connection> PaymentService<C> {
    pub fn new(store: RecordStoreHandle<C::SubmissionRepository>, aggregator: Aggregator) -> Self {
        Self { store, aggregator }
    }

    /// Mark every submission of the participant as paid or unpaid.
    pub fn set_paid(&self, command: SetPaidCommand) -> Result<PaymentStatusResult> {
        info!(
            "💰 PAYMENT: Setting {} to {}",
            command.participant_name,
            Self::label(command.paid)
        );

        let name = command.participant_name.trim().to_string();
        let paid = command.paid;
        let updated_count = self.store.mutate(|store| {
            Self::ensure_on_roster(store, &name)?;
            Ok(store.set_paid(&name, paid))
        })?;

        Ok(Self::result(name, paid, updated_count))
    }

    /// Flip the participant's derived paid flag and write it to all of their
    /// submissions. A partially paid participant counts as unpaid, so the
    /// toggle marks everything paid.
    pub fn toggle_paid(&self, command: TogglePaidCommand) -> Result<PaymentStatusResult> {
        let name = command.participant_name.trim().to_string();
        info!("💰 PAYMENT: Toggling payment status for {}", name);

        let aggregator = self.aggregator;
        let (paid, updated_count) = self.store.mutate(|store| {
            Self::ensure_on_roster(store, &name)?;
            let paid = !aggregator.participant_paid(&name, store.submissions());
            Ok((paid, store.set_paid(&name, paid)))
        })?;

        Ok(Self::result(name, paid, updated_count))
    }

    fn ensure_on_roster(store: &RecordStore, name: &str) -> Result<(), SubmissionError> {
        if store.is_on_roster(name) {
            Ok(())
        } else {
            Err(SubmissionError::Validation(format!(
                "Unknown participant: {}",
                name
            )))
        }
    }

    fn label(paid: bool) -> &'static str {
        if paid {
            "paid"
        } else {
            "unpaid"
        }
    }

    fn result(participant_name: String, paid: bool, updated_count: usize) -> PaymentStatusResult {
        info!(
            "✅ PAYMENT: {} marked as {} ({} submissions updated)",
            participant_name,
            Self::label(paid),
            updated_count
        );

        PaymentStatusResult {
            success_message: format!("{} marked as {}", participant_name, Self::label(paid)),
            participant_name,
            paid,
            updated_count,
        }
    }
}
