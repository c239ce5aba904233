//! In-memory DXF drawing

use indexmap::IndexMap;

use crate::entities::EntityType;
use crate::io::dxf::CodePage;
use crate::types::{BoundingBox2D, Handle, Vector2};

/// AutoCAD 2000 drawing format
pub const ACAD_VERSION: &str = "AC1015";

/// Header variables written to the HEADER section
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderVariables {
    /// `$DWGCODEPAGE`, also selects the output text encoding
    pub code_page: CodePage,
    /// `$INSUNITS` (0 unitless, 6 metres)
    pub insertion_units: i16,
}

impl Default for HeaderVariables {
    fn default() -> Self {
        HeaderVariables {
            code_page: CodePage::Utf8,
            insertion_units: 0,
        }
    }
}

/// A drawing: header variables plus model-space entities in insertion order
#[derive(Debug, Clone)]
pub struct DxfDocument {
    /// Header variables
    pub header: HeaderVariables,
    entities: IndexMap<Handle, EntityType>,
    next_handle: u64,
}

impl DxfDocument {
    /// Create a new empty drawing
    pub fn new() -> Self {
        DxfDocument {
            header: HeaderVariables::default(),
            entities: IndexMap::new(),
            // Handles below this are reserved for tables and blocks
            next_handle: 0x20,
        }
    }

    /// Allocate a new unique handle
    pub fn allocate_handle(&mut self) -> Handle {
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Get the next handle value (without allocating)
    pub fn next_handle(&self) -> u64 {
        self.next_handle
    }

    /// Add an entity, assigning it a handle if it has none
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> Handle {
        let mut entity = entity.into();
        let handle = if entity.as_entity().handle().is_null() {
            let h = self.allocate_handle();
            entity.as_entity_mut().set_handle(h);
            h
        } else {
            entity.as_entity().handle()
        };

        self.entities.insert(handle, entity);
        handle
    }

    /// Iterate over all entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Union of all entity extents, `None` for an empty drawing
    pub fn extents(&self) -> Option<BoundingBox2D> {
        self.entities
            .values()
            .filter_map(|e| e.as_entity().bounding_box())
            .reduce(|acc, bbox| acc.union(&bbox))
    }

    /// `$EXTMIN` / `$EXTMAX` values, the origin for an empty drawing
    pub fn extent_corners(&self) -> (Vector2, Vector2) {
        self.extents()
            .map(|bbox| (bbox.min, bbox.max))
            .unwrap_or((Vector2::ZERO, Vector2::ZERO))
    }

    /// Layer names used by entities, first appearance first
    pub fn layer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entity in self.entities.values() {
            let layer = entity.as_entity().layer();
            if !names.contains(&layer) {
                names.push(layer);
            }
        }
        names
    }
}

impl Default for DxfDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LwPolyline, Point};

    #[test]
    fn test_add_entity_allocates_handles() {
        let mut doc = DxfDocument::new();
        let first = doc.add_entity(Point::on_layer("A", Vector2::new(1.0, 1.0)));
        let second = doc.add_entity(Point::on_layer("B", Vector2::new(2.0, 2.0)));

        assert_ne!(first, second);
        assert!(!first.is_null());
        assert_eq!(doc.entity_count(), 2);
        assert_eq!(doc.next_handle(), second.value() + 1);
        let layers: Vec<&str> = doc.entities().map(|e| e.as_entity().layer()).collect();
        assert_eq!(layers, vec!["A", "B"]);
    }

    #[test]
    fn test_extents() {
        let mut doc = DxfDocument::new();
        assert!(doc.extents().is_none());
        assert_eq!(doc.extent_corners(), (Vector2::ZERO, Vector2::ZERO));

        doc.add_entity(Point::on_layer("A", Vector2::new(-1.0, 4.0)));
        doc.add_entity(LwPolyline::from_points(
            "B",
            vec![Vector2::new(0.0, 0.0), Vector2::new(3.0, 2.0)],
        ));

        let (min, max) = doc.extent_corners();
        assert_eq!(min, Vector2::new(-1.0, 0.0));
        assert_eq!(max, Vector2::new(3.0, 4.0));
    }

    #[test]
    fn test_layer_names_in_order() {
        let mut doc = DxfDocument::new();
        doc.add_entity(Point::on_layer("Z", Vector2::ZERO));
        doc.add_entity(Point::on_layer("A", Vector2::ZERO));
        doc.add_entity(Point::on_layer("Z", Vector2::ZERO));
        assert_eq!(doc.layer_names(), vec!["Z", "A"]);
    }
}
