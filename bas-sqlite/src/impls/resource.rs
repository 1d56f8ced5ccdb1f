use crate::{Database, Error};
use bas_core::{
    models::{Map, ProviderId, Resource, ResourceId},
    ports::ResourceRepository,
};
use rusqlite::OptionalExtension as _;

impl ResourceRepository for Database {
    fn add_provider(&self, name: &str) -> Result<ProviderId, Error> {
        let conn = self.connect(true)?;
        conn.execute("insert into providers (name) values (?1)", (name,))?;
        Ok(ProviderId(conn.last_insert_rowid()))
    }

    fn providers(&self) -> Result<Map<ProviderId, String>, Error> {
        let conn = self.connect(false)?;
        let mut stmt = conn.prepare("select id, name from providers order by id")?;
        let rows = stmt
            .query_map((), |row| Ok((ProviderId(row.get(0)?), row.get(1)?)))?
            .collect::<Result<Map<_, _>, _>>()?;
        Ok(rows)
    }

    fn add_resource(
        &self,
        provider_id: ProviderId,
        name: &str,
        capacity: u32,
        base_price: f64,
    ) -> Result<ResourceId, Error> {
        let conn = self.connect(true)?;

        let known: Option<i64> = conn
            .query_row(
                "select id from providers where id = ?1",
                (provider_id.0,),
                |row| row.get(0),
            )
            .optional()?;
        if known.is_none() {
            return Err(Error::UnknownProvider(provider_id));
        }

        conn.execute(
            "insert into resources (provider_id, name, capacity, base_price) values (?1, ?2, ?3, ?4)",
            (provider_id.0, name, capacity, base_price),
        )?;
        Ok(ResourceId(conn.last_insert_rowid()))
    }

    fn update_resource(
        &self,
        resource_id: ResourceId,
        capacity: u32,
        base_price: f64,
    ) -> Result<bool, Error> {
        let conn = self.connect(true)?;
        let changed = conn.execute(
            "update resources set capacity = ?1, base_price = ?2 where id = ?3",
            (capacity, base_price, resource_id.0),
        )?;
        Ok(changed > 0)
    }

    fn resources(&self) -> Result<Map<ResourceId, Resource>, Error> {
        let conn = self.connect(false)?;
        resources_with(&conn)
    }
}

/// The shared resource read, so the snapshot can reuse one connection.
pub(crate) fn resources_with(conn: &rusqlite::Connection) -> Result<Map<ResourceId, Resource>, Error> {
    let mut stmt = conn.prepare(
        "select id, provider_id, name, capacity, base_price from resources order by id",
    )?;
    let rows = stmt.query_and_then((), |row| -> Result<(ResourceId, Resource), Error> {
        let id = ResourceId(row.get(0)?);
        let capacity: i64 = row.get(3)?;
        // The schema checks capacity >= 0, but a hand-edited row should
        // surface as a structured error rather than a silent wrap.
        let capacity = u32::try_from(capacity).map_err(|_| Error::CapacityOutOfRange(id))?;
        Ok((
            id,
            Resource {
                id,
                provider_id: ProviderId(row.get(1)?),
                name: row.get(2)?,
                capacity,
                base_price: row.get(4)?,
            },
        ))
    })?;
    rows.collect()
}
