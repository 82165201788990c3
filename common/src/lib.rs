//! Cafe Finder Common Library
//!
//! CLIとWeb(WASM)で共有される状態管理・型・ユーティリティ

pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod ordering;
pub mod presenter;
pub mod record;
pub mod report;
pub mod session;
pub mod state;
pub mod status;
pub mod store;
pub mod types;

pub use config::{AppConfig, PhotoSize, SearchConfig};
pub use detail::{DetailInfo, OpenStatus, UNKNOWN};
pub use error::{Error, Result};
pub use filter::{matches_query, normalize_query};
pub use ordering::sort_by_name;
pub use presenter::{MarkerEvent, MarkerPresenter, NullPresenter, RecordingPresenter};
pub use record::PlaceRecord;
pub use report::{Banner, ErrorReporter, Issue};
pub use session::{load_detail, start_session, Geolocator, PlacesService};
pub use state::{AppState, DetailRequest};
pub use status::{EnvironmentError, PlacesStatus};
pub use store::{AnnotationStore, KeyValueBackend, MemoryBackend};
pub use types::{AddressComponent, LatLng, NearbyRequest, PlaceDetails, PlaceResult, Review};
