//! Loading, reloading and querying of a spot table.

use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::Serialize;

use crate::hash::sha256;
use crate::{Config, Dataset, Error, FilterQuery, MapView, RawTable, Source, Spot, TagUniverse};

/// The outcome of a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    /// The source content changed (or nothing was loaded yet), so the dataset
    /// was rebuilt.
    Changed,
    /// The source content is identical to what the current dataset was built
    /// from, so it was kept.
    Unchanged,
}

/// What is handed to the presentation layer for one query.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    /// The spots matching the query, in table order.
    pub spots: Vec<Spot>,
    /// Tags available for filtering. `None` if the data has no tags column.
    pub tags: Option<TagUniverse>,
    /// The query this selection was produced for.
    pub query: FilterQuery,
    /// Suggested initial map view, if there is anything to show.
    pub view: Option<MapView>,
}

#[derive(Debug)]
struct Loaded {
    fingerprint: String,
    dataset: Dataset,
}

/// Owns a source of spots and the dataset most recently built from it.
///
/// Nothing is cached implicitly: the dataset only changes when
/// [`Catalog::reload`] or [`Catalog::invalidate`] is called.
#[derive(Debug)]
pub struct Catalog {
    source: Source,
    delimiter: Option<u8>,
    zoom: u8,
    loaded: Option<Loaded>,
}

impl Catalog {
    /// Constructor. Does not load anything yet.
    pub fn new(source: Source, delimiter: Option<u8>, zoom: u8) -> Self {
        Self {
            source,
            delimiter,
            zoom,
            loaded: None,
        }
    }

    /// Creates a catalog for the file and settings named in the given
    /// configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Source::File(config.source.clone()),
            config.delimiter_byte()?,
            config.zoom,
        ))
    }

    /// Loads the source for the first time. Equivalent to [`Catalog::reload`].
    pub fn load(&mut self) -> Result<Reload> {
        self.reload()
    }

    /// Reads the source again and rebuilds the dataset if its content
    /// changed.
    ///
    /// On failure the current dataset is discarded, and queries fail until a
    /// subsequent reload succeeds.
    pub fn reload(&mut self) -> Result<Reload> {
        match self.try_reload() {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.loaded = None;
                Err(e)
            }
        }
    }

    fn try_reload(&mut self) -> Result<Reload> {
        let content = self.source.read()?;
        let fingerprint = sha256(&content);
        if let Some(loaded) = &self.loaded {
            if loaded.fingerprint == fingerprint {
                debug!("Source {} is unchanged ({})", self.source, fingerprint);
                return Ok(Reload::Unchanged);
            }
        }

        let table = RawTable::parse(&content, self.delimiter)
            .wrap_err_with(|| format!("failed to parse table from {}", self.source))?;
        let dataset = Dataset::from_table(&table)
            .wrap_err_with(|| format!("failed to resolve spots from {}", self.source))?;
        info!(
            "Loaded {} spot(s) from {} ({} record(s) without coordinates)",
            dataset.spots().len(),
            self.source,
            dataset.dropped()
        );
        self.loaded = Some(Loaded {
            fingerprint,
            dataset,
        });
        Ok(Reload::Changed)
    }

    /// Discards the current dataset. The next reload always rebuilds.
    pub fn invalidate(&mut self) {
        if self.loaded.take().is_some() {
            debug!("Invalidated dataset for {}", self.source);
        }
    }

    /// The current dataset, if one is loaded.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    /// Filters the current dataset.
    pub fn query(&self, query: &FilterQuery) -> Result<Selection, Error> {
        let dataset = self.dataset().ok_or(Error::NotLoaded)?;
        let spots = dataset
            .filter(query)
            .into_iter()
            .cloned()
            .collect::<Vec<Spot>>();
        let view = MapView::fit(&spots, self.zoom);
        Ok(Selection {
            spots,
            tags: dataset.tags().cloned(),
            query: query.clone(),
            view,
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;
    use crate::fs::temp_file;
    use crate::Coordinate;

    const SPOTS: &str = "\
name,address,latitude,longitude,tags
Le Grand Café,1 place Bellecour,45.0,4.0,\"food, terrace\"
Plage,Annecy,47.0,6.0,beach
";

    #[test]
    fn queries_require_a_loaded_dataset() {
        let catalog = Catalog::new(Source::Inline(SPOTS.to_string()), None, 14);
        assert!(matches!(
            catalog.query(&FilterQuery::default()),
            Err(Error::NotLoaded)
        ));
    }

    #[test]
    fn selection_echoes_the_query_and_suggests_a_view() {
        let mut catalog = Catalog::new(Source::Inline(SPOTS.to_string()), None, 12);
        assert_eq!(catalog.load().unwrap(), Reload::Changed);

        let query = FilterQuery::default().with_search("grand");
        let selection = catalog.query(&query).unwrap();
        assert_eq!(selection.query, query);
        assert_eq!(selection.spots.len(), 1);
        assert_eq!(
            selection.view,
            Some(MapView {
                center: Coordinate::new(45.0, 4.0),
                zoom: 12
            })
        );
        let tags = selection.tags.unwrap();
        assert_eq!(tags.len(), 3);

        let selection = catalog
            .query(&FilterQuery::default().with_search("nothing"))
            .unwrap();
        assert!(selection.spots.is_empty());
        assert!(selection.view.is_none());
    }

    #[test]
    fn reload_rebuilds_only_when_content_changes() {
        let path = temp_file("spots.csv", SPOTS);
        let mut catalog = Catalog::new(Source::File(path.clone()), None, 14);
        assert_eq!(catalog.load().unwrap(), Reload::Changed);
        assert_eq!(catalog.reload().unwrap(), Reload::Unchanged);

        fs::write(&path, format!("{}Lac,Bourget,45.7,5.8,lake\n", SPOTS)).unwrap();
        assert_eq!(catalog.reload().unwrap(), Reload::Changed);
        assert_eq!(catalog.dataset().unwrap().spots().len(), 3);

        catalog.invalidate();
        assert!(catalog.dataset().is_none());
        assert_eq!(catalog.reload().unwrap(), Reload::Changed);
    }

    #[test]
    fn failed_reload_discards_the_dataset() {
        let path = temp_file("spots.csv", SPOTS);
        let mut catalog = Catalog::new(Source::File(path.clone()), None, 14);
        catalog.load().unwrap();

        fs::write(&path, "just_one_column\nvalue\n").unwrap();
        assert!(catalog.reload().is_err());
        assert!(catalog.dataset().is_none());
        assert!(matches!(
            catalog.query(&FilterQuery::default()),
            Err(Error::NotLoaded)
        ));

        fs::write(&path, SPOTS).unwrap();
        assert_eq!(catalog.reload().unwrap(), Reload::Changed);
        assert!(catalog.query(&FilterQuery::default()).is_ok());
    }

    #[test]
    fn load_failures_keep_their_cause() {
        let mut catalog = Catalog::new(Source::Inline("name\nA\n".to_string()), None, 14);
        let err = catalog.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SchemaIncomplete { columns: 1 })
        ));
        let message = format!("{:#}", err);
        assert!(
            message.starts_with("failed to resolve spots from <inline>: "),
            "unexpected message: {}",
            message
        );
        assert!(
            message.contains("at least 2 are needed to resolve name and address"),
            "unexpected message: {}",
            message
        );
    }

    #[test]
    fn missing_source_is_a_load_failure() {
        let config = Config::default()
            .with_source(std::env::temp_dir().join("spotter-missing-source.csv"));
        let mut catalog = Catalog::from_config(&config).unwrap();
        let err = catalog.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::LoadFromFile(_, _))
        ));
    }
}
