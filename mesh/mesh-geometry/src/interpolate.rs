//! Weighted attribute interpolation.
//!
//! A refinement records, for every entity it creates, a list of
//! `(weight, old entity)` pairs: its provenance. Once topology is complete,
//! every interpolable attribute map of the old geometry is carried over by
//! evaluating, per new entity,
//!
//! ```text
//! value(new) = sum(w_i * value(old_i)) / sum(w_i)
//! ```
//!
//! where both sums only range over the `old_i` that actually have a value in
//! that map. A new entity none of whose sources has a value gets no entry.

use hashbrown::HashMap;
use tracing::trace;

use crate::attribute::{attribute_names, AttributeMap, AttributeMapCollection, Interpolable};
use crate::handles::Element;

/// Weighted provenance of new entities in terms of old entities.
///
/// Source lists are created lazily: adding to an entity that has no list yet
/// starts one, and reading an unknown entity yields an empty slice.
///
/// # Example
///
/// ```
/// use mesh_geometry::{Point, Provenance};
///
/// let new = Point::from_index(0);
/// let mut provenance = Provenance::new();
/// provenance.add(new, 0.5, Point::from_index(1));
/// provenance.add(new, 0.5, Point::from_index(2));
///
/// assert_eq!(provenance.sources(new).len(), 2);
/// assert!(provenance.sources(Point::from_index(9)).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance<K: Element> {
    sources: HashMap<K, Vec<(f64, K)>>,
}

impl<K: Element> Default for Provenance<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Element> Provenance<K> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Append `(weight, old)` to the sources of `new`.
    pub fn add(&mut self, new: K, weight: f64, old: K) {
        self.sources.entry(new).or_default().push((weight, old));
    }

    /// Append every pair of `sources` to the sources of `new`.
    pub fn extend(&mut self, new: K, sources: impl IntoIterator<Item = (f64, K)>) {
        self.sources.entry(new).or_default().extend(sources);
    }

    /// Mutable source list of `new`, created empty if absent.
    pub fn sources_mut(&mut self, new: K) -> &mut Vec<(f64, K)> {
        self.sources.entry(new).or_default()
    }

    /// Sources recorded for `new`.
    #[must_use]
    pub fn sources(&self, new: K) -> &[(f64, K)] {
        self.sources.get(&new).map_or(&[], Vec::as_slice)
    }

    /// Sum of all weights recorded for `new`.
    #[must_use]
    pub fn total_weight(&self, new: K) -> f64 {
        self.sources(new).iter().map(|&(weight, _)| weight).sum()
    }

    /// Whether any source list exists for `new`.
    #[must_use]
    pub fn contains(&self, new: K) -> bool {
        self.sources.contains_key(&new)
    }

    /// Iterate over `(new, sources)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (K, &[(f64, K)])> {
        self.sources.iter().map(|(&new, list)| (new, list.as_slice()))
    }

    /// Number of new entities with a source list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no new entity has a source list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Interpolate one typed map through `provenance`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn interpolate_values<K, T>(old: &HashMap<K, T>, provenance: &Provenance<K>) -> HashMap<K, T>
where
    K: Element,
    T: Interpolable,
{
    let mut result = HashMap::with_capacity(provenance.len());

    for (new, sources) in provenance.iter() {
        let sum_weights: f64 = sources
            .iter()
            .filter(|(_, source)| old.contains_key(source))
            .map(|&(weight, _)| weight)
            .sum();

        if sum_weights == 0.0 {
            continue;
        }

        let mut value = T::zero();
        for (weight, source) in sources {
            if let Some(old_value) = old.get(source) {
                value.accumulate(weight / sum_weights, old_value);
            }
        }
        result.insert(new, value);
    }

    result
}

/// Interpolate one attribute map of any kind.
///
/// Returns `None` for kinds that cannot be blended.
#[must_use]
pub fn interpolate_attribute_map<K: Element>(
    map: &AttributeMap<K>,
    provenance: &Provenance<K>,
) -> Option<AttributeMap<K>> {
    match map {
        AttributeMap::Scalar(values) => Some(AttributeMap::Scalar(interpolate_values(values, provenance))),
        AttributeMap::Vector2(values) => Some(AttributeMap::Vector2(interpolate_values(values, provenance))),
        AttributeMap::Vector3(values) => Some(AttributeMap::Vector3(interpolate_values(values, provenance))),
        AttributeMap::Vector4(values) => Some(AttributeMap::Vector4(interpolate_values(values, provenance))),
        AttributeMap::Matrix4(values) => Some(AttributeMap::Matrix4(interpolate_values(values, provenance))),
        AttributeMap::Index(_) => None,
    }
}

/// Interpolate every map of `source` into `destination`.
///
/// The renderer-owned `corner_indices` map and non-interpolable maps are
/// skipped. Returns the number of maps written.
pub fn interpolate_attribute_maps<K: Element>(
    source: &AttributeMapCollection<K>,
    destination: &mut AttributeMapCollection<K>,
    provenance: &Provenance<K>,
) -> usize {
    let mut written = 0;

    for (name, map) in source.iter() {
        if name == attribute_names::CORNER_INDICES {
            continue;
        }
        match interpolate_attribute_map(map, provenance) {
            Some(interpolated) => {
                destination.insert_map(name, interpolated);
                written += 1;
            }
            None => trace!("Skipping non-interpolable attribute map '{}' ({:?})", name, map.kind()),
        }
    }

    written
}
