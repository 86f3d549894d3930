//! Conversion between the structured car model and its stored form.
//!
//! The store only ever sees `images` and `specs` as JSON text; this module is
//! the one place that text is produced or parsed.

use crate::models::{CarDraft, CarListing, CarRecord, CarRow, Specs};
use crate::repository::StoreError;

fn codec_error(op: &'static str, field: &'static str, id: &str) -> impl FnOnce(serde_json::Error) -> StoreError {
    let id = id.to_string();
    move |source| StoreError::Codec {
        op,
        field,
        id,
        source,
    }
}

pub fn encode_images(id: &str, images: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(images).map_err(codec_error("encode", "images", id))
}

pub fn decode_images(id: &str, raw: &str) -> Result<Vec<String>, StoreError> {
    serde_json::from_str(raw).map_err(codec_error("decode", "images", id))
}

pub fn encode_specs(id: &str, specs: &Specs) -> Result<String, StoreError> {
    serde_json::to_string(specs).map_err(codec_error("encode", "specs", id))
}

pub fn decode_specs(id: &str, raw: &str) -> Result<Specs, StoreError> {
    serde_json::from_str(raw).map_err(codec_error("decode", "specs", id))
}

pub fn encode_draft(draft: CarDraft) -> Result<CarRecord, StoreError> {
    let images = encode_images(&draft.id, &draft.images)?;
    let specs = encode_specs(&draft.id, &draft.specs)?;
    Ok(CarRecord {
        id: draft.id,
        brand: draft.brand,
        model: draft.model,
        year: draft.year,
        price: draft.price,
        mileage: draft.mileage,
        fuel: draft.fuel,
        transmission: draft.transmission,
        color: draft.color,
        images,
        specs,
        status: draft.status,
    })
}

pub fn decode_row(row: CarRow) -> Result<CarListing, StoreError> {
    let images = decode_images(&row.id, &row.images)?;
    let specs = decode_specs(&row.id, &row.specs)?;
    Ok(CarListing {
        id: row.id,
        brand: row.brand,
        model: row.model,
        year: row.year,
        price: row.price,
        mileage: row.mileage,
        fuel: row.fuel,
        transmission: row.transmission,
        color: row.color,
        images,
        specs,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
