use std::sync::LazyLock;

use common::CreateGamePayload;
use num_traits::FromPrimitive;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::NewGame;

pub const DEFAULT_IMAGE_TYPE: &str = "jpg";

static IMAGE_TYPE_REGEX: LazyLock<Regex> =
     LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,10}$").expect("static regex"));

fn required<T>(value: Option<T>, field: &str) -> Result<T, String> {
     value.ok_or_else(|| format!("Missing required field: {}", field))
}

pub fn validate_title(title: &str) -> Result<(), String> {
     if title.trim().is_empty() {
          return Err("Title must not be empty".to_string());
     }
     Ok(())
}

pub fn validate_rating(rating: f64) -> Result<Decimal, String> {
     if !rating.is_finite() {
          return Err("Rating must be a finite number".to_string());
     }
     Decimal::from_f64(rating).ok_or_else(|| format!("Rating {} is out of range", rating))
}

/// Checks the declared image extension, which ends up in both the object
/// key and the `image/<type>` content type.
pub fn validate_image_type(image_type: Option<&str>) -> Result<String, String> {
     let image_type = image_type
          .filter(|t| !t.is_empty())
          .unwrap_or(DEFAULT_IMAGE_TYPE);
     if !IMAGE_TYPE_REGEX.is_match(image_type) {
          return Err(format!("Unsupported image type: {}", image_type));
     }
     Ok(image_type.to_ascii_lowercase())
}

/// Turns a create payload into insertable values. The image URL is taken
/// as given here; an uploaded file replaces it later.
pub fn validate_create_game(payload: &CreateGamePayload) -> Result<NewGame, String> {
     let title = required(payload.title.clone(), "title")?;
     validate_title(&title)?;
     let genre = required(payload.genre.clone(), "genre")?;
     let rating = validate_rating(required(payload.rating, "rating")?)?;
     let description = required(payload.description.clone(), "description")?;
     let release_date = required(payload.release_date, "releaseDate")?;

     Ok(NewGame {
          title,
          genre,
          rating,
          image_url: payload.image.clone(),
          trailer_url: payload.trailer.clone().unwrap_or_default(),
          description,
          release_date,
     })
}
