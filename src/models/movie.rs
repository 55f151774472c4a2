//! Catalog (TMDB) data-transfer shapes.
//!
//! Read-only; only the snapshot fields of [`CatalogMovie`] are ever persisted,
//! copied into a favorite entry when it is added.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Search/list results carry `genre_ids`; the single-movie endpoint
    /// carries `genres` instead, see [`CatalogMovie::all_genre_ids`].
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub popularity: f64,
}

impl CatalogMovie {
    /// Genre ids regardless of which endpoint produced this value.
    pub fn all_genre_ids(&self) -> Vec<i32> {
        if !self.genre_ids.is_empty() {
            return self.genre_ids.clone();
        }
        self.genres.iter().map(|g| g.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    pub page: i32,
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
    #[serde(default)]
    pub total_pages: i32,
    #[serde(default)]
    pub total_results: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i32,
    pub logo_path: Option<String>,
    pub name: String,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: String,
    pub iso_639_1: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogMovieDetail {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
}

/// Renders an amount with comma thousands separators (`63000000` → `63,000,000`).
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(63_000_000), "63,000,000");
        assert_eq!(format_thousands(100_853_753), "100,853,753");
        assert_eq!(format_thousands(-1234567), "-1,234,567");
    }

    #[test]
    fn detail_endpoint_genres_feed_genre_ids() {
        let movie: CatalogMovie = serde_json::from_value(serde_json::json!({
            "id": 550,
            "title": "Fight Club",
            "poster_path": null,
            "genres": [{"id": 18, "name": "Drama"}, {"id": 53, "name": "Thriller"}]
        }))
        .unwrap();

        assert_eq!(movie.all_genre_ids(), vec![18, 53]);
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_date, None);
    }
}
