//! A validated set of spots, ready to be filtered.

use log::debug;

use crate::filter::{self, FilterQuery};
use crate::{ColumnMap, Error, RawTable, Spot, TagUniverse};

/// The spots derived from one load of a table, along with the tag universe
/// computed over them.
///
/// A dataset never changes once built. Reloading the source produces a new
/// one.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: ColumnMap,
    spots: Vec<Spot>,
    tags: Option<TagUniverse>,
    dropped: usize,
}

impl Dataset {
    /// Resolves the table's columns, turns every record into a spot and
    /// discards the records whose coordinates could not be resolved.
    pub fn from_table(table: &RawTable) -> Result<Self, Error> {
        let columns = ColumnMap::resolve(table.headers())?;
        debug!("Resolved columns: {}", columns);

        let spots = table
            .records()
            .iter()
            .filter_map(|record| Spot::from_record(record, &columns))
            .collect::<Vec<Spot>>();
        let dropped = table.records().len() - spots.len();
        debug!(
            "Kept {} spot(s), dropped {} record(s) without coordinates",
            spots.len(),
            dropped
        );

        let tags = columns.tags.as_ref().map(|_| TagUniverse::build(&spots));
        Ok(Self {
            columns,
            spots,
            tags,
            dropped,
        })
    }

    /// The spots matching the given query, in table order.
    pub fn filter(&self, query: &FilterQuery) -> Vec<&Spot> {
        filter::apply(&self.spots, query, self.tags.is_some())
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// All validated spots.
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// The tags that can be filtered on, or `None` if the data has no tags
    /// column (in which case tag filtering is not available at all).
    pub fn tags(&self) -> Option<&TagUniverse> {
        self.tags.as_ref()
    }

    /// How many records were left out for lack of a coordinate.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Runs the whole pipeline over a table in one go.
///
/// The returned tag universe is empty when the table has no tags column.
pub fn resolve_and_filter(
    table: &RawTable,
    query: &FilterQuery,
) -> Result<(Vec<Spot>, TagUniverse), Error> {
    let dataset = Dataset::from_table(table)?;
    let spots = dataset.filter(query).into_iter().cloned().collect();
    Ok((spots, dataset.tags.unwrap_or_default()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RawRecord;

    fn table(content: &str) -> RawTable {
        RawTable::parse(content.as_bytes(), None).unwrap()
    }

    const SPOTS: &str = "\
Nom;Adresse;Latitude;Longitude;Tags;Lien Maps
Le Grand Café;1 place Bellecour;45,757;4,832;food, terrace;
Plage;Lac d'Annecy;45,86;6,17;beach, lake;https://maps.example/@45.9,6.2,14z
Nowhere;?;;;desert;https://goo.gl/maps/abc
Forêt;Bois;oops;2,0;forest;https://maps.example/?q=48.9,2.5
";

    #[test]
    fn every_spot_has_a_finite_coordinate() {
        let dataset = Dataset::from_table(&table(SPOTS)).unwrap();
        assert_eq!(dataset.spots().len(), 3);
        assert_eq!(dataset.dropped(), 1);
        assert!(dataset
            .spots()
            .iter()
            .all(|s| s.coordinate.lat.is_finite() && s.coordinate.lon.is_finite()));
        let plage = &dataset.spots()[1];
        assert_eq!((plage.coordinate.lat, plage.coordinate.lon), (45.9, 6.2));
        let foret = &dataset.spots()[2];
        assert_eq!((foret.coordinate.lat, foret.coordinate.lon), (48.9, 2.5));
    }

    #[test]
    fn tag_universe_covers_validated_spots_only() {
        let dataset = Dataset::from_table(&table(SPOTS)).unwrap();
        let tags = dataset
            .tags()
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect::<Vec<&str>>();
        assert_eq!(tags, vec!["beach", "food", "forest", "lake", "terrace"]);
    }

    #[test]
    fn filters_by_name_and_tag() {
        let dataset = Dataset::from_table(&table(SPOTS)).unwrap();
        let query = FilterQuery::default().with_tag("beach").with_tag("forest");
        let names = dataset
            .filter(&query)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["Plage", "Forêt"]);

        let query = query.with_search("PLA");
        assert_eq!(dataset.filter(&query).len(), 1);
    }

    #[test]
    fn missing_tags_column_disables_tag_filtering() {
        let t = table("name,address,lat,lon\nA,x,1,2\nB,y,3,4\n");
        let dataset = Dataset::from_table(&t).unwrap();
        assert!(dataset.tags().is_none());
        let query = FilterQuery::default().with_tag("beach");
        assert_eq!(dataset.filter(&query).len(), 2);

        let (spots, universe) = resolve_and_filter(&t, &query).unwrap();
        assert_eq!(spots.len(), 2);
        assert!(universe.is_empty());
    }

    #[test]
    fn tables_without_coordinate_sources_produce_nothing() {
        let t = RawTable::new(
            ["name", "address", "notes"],
            vec![
                ["A", "@1.0,2.0", "q=3,4"].into_iter().collect::<RawRecord>(),
                ["B", "1.0", "2.0"].into_iter().collect::<RawRecord>(),
            ],
        );
        let (spots, _) = resolve_and_filter(&t, &FilterQuery::default()).unwrap();
        assert!(spots.is_empty());
    }

    #[test]
    fn single_column_tables_are_rejected() {
        let t = table("name\nA\n");
        match Dataset::from_table(&t) {
            Err(Error::SchemaIncomplete { columns: 1 }) => (),
            other => panic!("expected an incomplete schema, but got {:?}", other),
        }
    }
}
