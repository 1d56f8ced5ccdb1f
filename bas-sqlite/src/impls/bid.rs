use super::{decode_bundle, encode_bundle};
use crate::{Database, Error};
use bas_core::{
    models::{Bid, BidId, CustomerId, Map, ResourceId},
    ports::BidRepository,
};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

impl BidRepository for Database {
    fn add_customer(&self, name: &str) -> Result<CustomerId, Error> {
        let conn = self.connect(true)?;
        conn.execute("insert into customers (name) values (?1)", (name,))?;
        Ok(CustomerId(conn.last_insert_rowid()))
    }

    fn customers(&self) -> Result<Map<CustomerId, String>, Error> {
        let conn = self.connect(false)?;
        let mut stmt = conn.prepare("select id, name from customers order by id")?;
        let rows = stmt
            .query_map((), |row| Ok((CustomerId(row.get(0)?), row.get(1)?)))?
            .collect::<Result<Map<_, _>, _>>()?;
        Ok(rows)
    }

    fn add_bid(
        &self,
        customer: &str,
        price: f64,
        bundle: &[ResourceId],
    ) -> Result<BidId, Error> {
        if bundle.is_empty() {
            return Err(Error::EmptyBundle);
        }

        let mut conn = self.connect(true)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Acceptance-time validation: every bundle reference must resolve.
        // The clearing pipeline relies on this and only checks defensively.
        for resource_id in bundle {
            let known: Option<i64> = tx
                .query_row(
                    "select id from resources where id = ?1",
                    (resource_id.0,),
                    |row| row.get(0),
                )
                .optional()?;
            if known.is_none() {
                return Err(Error::InvalidBundleReference(*resource_id));
            }
        }

        tx.execute(
            "insert into bids (customer, price, bundle) values (?1, ?2, ?3)",
            (customer, price, encode_bundle(bundle)),
        )?;
        let id = BidId(tx.last_insert_rowid());
        tx.commit()?;

        Ok(id)
    }

    fn bids(&self) -> Result<Vec<Bid>, Error> {
        let conn = self.connect(false)?;
        bids_with(&conn)
    }

    fn clear_bids(&self) -> Result<(), Error> {
        let conn = self.connect(true)?;
        conn.execute("delete from bids", ())?;
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Error> {
        let mut conn = self.connect(true)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("delete from bids", ())?;
        tx.execute("delete from resources", ())?;
        tx.execute("delete from providers", ())?;
        tx.execute("delete from customers", ())?;
        tx.commit()?;
        Ok(())
    }
}

/// The shared bid read, so the snapshot can reuse one connection. Bids come
/// back in id order, which is submission order.
pub(crate) fn bids_with(conn: &rusqlite::Connection) -> Result<Vec<Bid>, Error> {
    let mut stmt = conn.prepare("select id, customer, price, bundle from bids order by id")?;
    let rows = stmt.query_and_then((), |row| -> Result<Bid, Error> {
        let bundle: String = row.get(3)?;
        Ok(Bid {
            id: BidId(row.get(0)?),
            customer: row.get(1)?,
            price: row.get(2)?,
            bundle: decode_bundle(&bundle)?,
        })
    })?;
    rows.collect()
}
