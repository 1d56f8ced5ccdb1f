use super::{bid::bids_with, resource::resources_with};
use crate::{Database, Error};
use bas_core::{
    models::{ApplyInstructions, ClearingSnapshot},
    ports::ClearingRepository,
};
use rusqlite::TransactionBehavior;

impl ClearingRepository for Database {
    fn snapshot(&self) -> Result<ClearingSnapshot, Error> {
        let mut conn = self.connect(false)?;
        // One read transaction so the resource ledger and the bid set are
        // views of the same database state.
        let tx = conn.transaction()?;
        let resources = resources_with(&tx)?;
        let bids = bids_with(&tx)?;
        Ok(ClearingSnapshot { resources, bids })
    }

    fn apply(&self, instructions: &ApplyInstructions, purge: bool) -> Result<(), Error> {
        let mut conn = self.connect(true)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        for (resource_id, units) in instructions.decrements.iter() {
            let capacity: i64 = tx.query_row(
                "select capacity from resources where id = ?1",
                (resource_id.0,),
                |row| row.get(0),
            )?;
            // Never clamp: an underflow means the instructions were built
            // against a stale snapshot, and nothing may be written.
            if capacity < i64::from(*units) {
                return Err(Error::CapacityUnderflow(*resource_id));
            }
            tx.execute(
                "update resources set capacity = capacity - ?1 where id = ?2",
                (*units, resource_id.0),
            )?;
        }

        if purge {
            for bid_id in &instructions.remove_bids {
                tx.execute("delete from bids where id = ?1", (bid_id.0,))?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            resources = instructions.decrements.len(),
            purged = purge.then_some(instructions.remove_bids.len()),
            "applied clearing run"
        );

        Ok(())
    }
}
