use crate::{Database, Error};
use bas_core::{models::ResourceId, ports::Repository};

mod bid;
mod clearing;
mod resource;

impl Repository for Database {
    type Error = Error;
}

/// The bundle column format: comma-separated resource ids, submission order
/// preserved, no whitespace.
pub(crate) fn encode_bundle(bundle: &[ResourceId]) -> String {
    bundle
        .iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn decode_bundle(raw: &str) -> Result<Vec<ResourceId>, Error> {
    raw.split(',')
        .map(|part| {
            part.parse::<i64>()
                .map(ResourceId)
                .map_err(|_| Error::MalformedBundle(raw.to_owned()))
        })
        .collect()
}
