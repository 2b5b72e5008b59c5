use super::ContentType;
use json::JsonValue;

#[derive(Clone, Debug)]
/// A company which produced a movie or show
pub struct ProductionCompany {
    data: JsonValue,
}

impl ProductionCompany {
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    pub fn id(&self) -> Option<u64> {
        self.data["id"].as_u64()
    }

    pub fn name(&self) -> Option<&str> {
        self.data["name"].as_str()
    }

    /// Possible null
    pub fn logo_path(&self) -> Option<&str> {
        self.data["logo_path"].as_str()
    }

    pub fn origin_country(&self) -> Option<&str> {
        self.data["origin_country"].as_str()
    }

    fn summary(&self) -> JsonValue {
        json::object! {
            "id": self.id(),
            "name": self.name(),
            "logo_path": self.logo_path(),
            "origin_country": self.origin_country(),
        }
    }
}

fn production_companies(data: &JsonValue) -> Vec<ProductionCompany> {
    let mut list = Vec::new();
    for company in data["production_companies"].members() {
        list.push(ProductionCompany::new(company.clone()));
    }
    list
}

fn production_companies_summary(companies: Vec<ProductionCompany>) -> JsonValue {
    JsonValue::Array(companies.iter().map(|c| c.summary()).collect())
}

fn genres(data: &JsonValue) -> Vec<&str> {
    data["genres"]
        .members()
        .filter_map(|g| g["name"].as_str())
        .collect()
}

#[derive(Clone, Debug)]
pub struct TmdbMovie {
    data: JsonValue,
}

impl TmdbMovie {
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    pub fn id(&self) -> Option<u64> {
        self.data["id"].as_u64()
    }

    pub fn title(&self) -> Option<&str> {
        self.data["title"].as_str()
    }

    pub fn original_title(&self) -> Option<&str> {
        self.data["original_title"].as_str()
    }

    pub fn overview(&self) -> Option<&str> {
        self.data["overview"].as_str()
    }

    pub fn tagline(&self) -> Option<&str> {
        self.data["tagline"].as_str()
    }

    pub fn release_date(&self) -> Option<&str> {
        self.data["release_date"].as_str()
    }

    /// Runtime in minutes
    pub fn runtime(&self) -> Option<u64> {
        self.data["runtime"].as_u64()
    }

    pub fn genres(&self) -> Vec<&str> {
        genres(&self.data)
    }

    pub fn production_companies(&self) -> Vec<ProductionCompany> {
        production_companies(&self.data)
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.data["poster_path"].as_str()
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.data["vote_average"].as_f64()
    }

    pub fn vote_count(&self) -> Option<u64> {
        self.data["vote_count"].as_u64()
    }

    pub fn summary(&self) -> JsonValue {
        json::object! {
            "id": self.id(),
            "title": self.title(),
            "original_title": self.original_title(),
            "overview": self.overview(),
            "tagline": self.tagline(),
            "release_date": self.release_date(),
            "runtime": self.runtime(),
            "genres": self.genres(),
            "production_companies": production_companies_summary(self.production_companies()),
            "poster_path": self.poster_path(),
            "vote_average": self.vote_average(),
            "vote_count": self.vote_count(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TmdbTv {
    data: JsonValue,
}

impl TmdbTv {
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    pub fn id(&self) -> Option<u64> {
        self.data["id"].as_u64()
    }

    pub fn name(&self) -> Option<&str> {
        self.data["name"].as_str()
    }

    pub fn original_name(&self) -> Option<&str> {
        self.data["original_name"].as_str()
    }

    pub fn overview(&self) -> Option<&str> {
        self.data["overview"].as_str()
    }

    pub fn first_air_date(&self) -> Option<&str> {
        self.data["first_air_date"].as_str()
    }

    pub fn last_air_date(&self) -> Option<&str> {
        self.data["last_air_date"].as_str()
    }

    pub fn in_production(&self) -> Option<bool> {
        self.data["in_production"].as_bool()
    }

    pub fn number_of_episodes(&self) -> Option<u64> {
        self.data["number_of_episodes"].as_u64()
    }

    pub fn number_of_seasons(&self) -> Option<u64> {
        self.data["number_of_seasons"].as_u64()
    }

    pub fn created_by(&self) -> Vec<&str> {
        self.data["created_by"]
            .members()
            .filter_map(|p| p["name"].as_str())
            .collect()
    }

    pub fn networks(&self) -> Vec<&str> {
        self.data["networks"]
            .members()
            .filter_map(|n| n["name"].as_str())
            .collect()
    }

    pub fn genres(&self) -> Vec<&str> {
        genres(&self.data)
    }

    pub fn production_companies(&self) -> Vec<ProductionCompany> {
        production_companies(&self.data)
    }

    /// Nullish according to TMDB docs
    pub fn next_episode_to_air(&self) -> Option<&JsonValue> {
        let next = &self.data["next_episode_to_air"];
        if next.is_null() {
            None
        } else {
            Some(next)
        }
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.data["vote_average"].as_f64()
    }

    pub fn vote_count(&self) -> Option<u64> {
        self.data["vote_count"].as_u64()
    }

    pub fn summary(&self) -> JsonValue {
        json::object! {
            "id": self.id(),
            "name": self.name(),
            "original_name": self.original_name(),
            "overview": self.overview(),
            "first_air_date": self.first_air_date(),
            "last_air_date": self.last_air_date(),
            "in_production": self.in_production(),
            "number_of_episodes": self.number_of_episodes(),
            "number_of_seasons": self.number_of_seasons(),
            "created_by": self.created_by(),
            "networks": self.networks(),
            "genres": self.genres(),
            "production_companies": production_companies_summary(self.production_companies()),
            "next_episode_to_air": self.next_episode_to_air().cloned(),
            "vote_average": self.vote_average(),
            "vote_count": self.vote_count(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TmdbPerson {
    data: JsonValue,
}

impl TmdbPerson {
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    pub fn id(&self) -> Option<u64> {
        self.data["id"].as_u64()
    }

    pub fn name(&self) -> Option<&str> {
        self.data["name"].as_str()
    }

    pub fn biography(&self) -> Option<&str> {
        self.data["biography"].as_str()
    }

    pub fn birthday(&self) -> Option<&str> {
        self.data["birthday"].as_str()
    }

    pub fn deathday(&self) -> Option<&str> {
        self.data["deathday"].as_str()
    }

    pub fn known_for_department(&self) -> Option<&str> {
        self.data["known_for_department"].as_str()
    }

    pub fn place_of_birth(&self) -> Option<&str> {
        self.data["place_of_birth"].as_str()
    }

    pub fn popularity(&self) -> Option<f64> {
        self.data["popularity"].as_f64()
    }

    pub fn summary(&self) -> JsonValue {
        json::object! {
            "id": self.id(),
            "name": self.name(),
            "biography": self.biography(),
            "birthday": self.birthday(),
            "deathday": self.deathday(),
            "known_for_department": self.known_for_department(),
            "place_of_birth": self.place_of_birth(),
            "popularity": self.popularity(),
        }
    }
}

#[derive(Clone, Debug)]
/// Details returned by TMDB for a [super::MediaRequest]
pub enum MediaDetails {
    Movie(TmdbMovie),
    Tv(TmdbTv),
    Person(TmdbPerson),
}

impl MediaDetails {
    pub fn new(content_type: ContentType, data: JsonValue) -> Self {
        match content_type {
            ContentType::Movie => Self::Movie(TmdbMovie::new(data)),
            ContentType::TvShow => Self::Tv(TmdbTv::new(data)),
            ContentType::Person => Self::Person(TmdbPerson::new(data)),
        }
    }

    /// Movie title, show name or person name
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.title(),
            Self::Tv(t) => t.name(),
            Self::Person(p) => p.name(),
        }
    }

    /// The fields we know about, in a stable shape
    pub fn summary(&self) -> JsonValue {
        match self {
            Self::Movie(m) => m.summary(),
            Self::Tv(t) => t.summary(),
            Self::Person(p) => p.summary(),
        }
    }

    pub fn into_json(self) -> JsonValue {
        match self {
            Self::Movie(m) => m.data,
            Self::Tv(t) => t.data,
            Self::Person(p) => p.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tv_details() {
        let data = json::object! {
            "id": 95557,
            "name": "Invincible",
            "in_production": true,
            "number_of_seasons": 2,
            "created_by": [{"id": 1, "name": "Robert Kirkman"}],
            "genres": [{"id": 16, "name": "Animation"}, {"id": 18, "name": "Drama"}],
            "networks": [{"id": 1024, "name": "Prime Video"}],
            "production_companies": [
                {"id": 2, "name": "Skybound Entertainment", "logo_path": null, "origin_country": "US"}
            ],
            "next_episode_to_air": null,
            "vote_average": 8.7,
        };
        let details = MediaDetails::new(ContentType::TvShow, data);
        assert_eq!(details.display_name(), Some("Invincible"));
        match &details {
            MediaDetails::Tv(tv) => {
                assert_eq!(tv.id(), Some(95557));
                assert_eq!(tv.in_production(), Some(true));
                assert_eq!(tv.number_of_seasons(), Some(2));
                assert_eq!(tv.created_by(), vec!["Robert Kirkman"]);
                assert_eq!(tv.genres(), vec!["Animation", "Drama"]);
                assert_eq!(tv.networks(), vec!["Prime Video"]);
                let companies = tv.production_companies();
                assert_eq!(companies.len(), 1);
                assert_eq!(companies[0].name(), Some("Skybound Entertainment"));
                assert_eq!(companies[0].logo_path(), None);
                assert!(tv.next_episode_to_air().is_none());
                assert_eq!(tv.vote_average(), Some(8.7));
            }
            _ => panic!("Expected tv details."),
        }
        let summary = details.summary();
        assert_eq!(summary["name"], "Invincible");
        assert_eq!(summary["production_companies"][0]["origin_country"], "US");
        assert!(summary["next_episode_to_air"].is_null());
        assert!(summary["overview"].is_null());
        assert_eq!(details.into_json()["name"], "Invincible");
    }

    #[test]
    fn test_movie_and_person_details() {
        let movie = MediaDetails::new(
            ContentType::Movie,
            json::object! {"id": 603, "title": "The Matrix", "runtime": 136},
        );
        assert_eq!(movie.display_name(), Some("The Matrix"));
        if let MediaDetails::Movie(m) = &movie {
            assert_eq!(m.runtime(), Some(136));
            assert!(m.production_companies().is_empty());
        }
        let person = MediaDetails::new(
            ContentType::Person,
            json::object! {"id": 6384, "name": "Keanu Reeves", "deathday": null},
        );
        assert_eq!(person.display_name(), Some("Keanu Reeves"));
        if let MediaDetails::Person(p) = &person {
            assert_eq!(p.deathday(), None);
        }
    }
}
