//! Edit-screen panels ("meta boxes").

use std::fmt;

/// Column a panel is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaBoxContext {
    Normal,
    Side,
    Advanced,
}

impl fmt::Display for MetaBoxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Side => "side",
            Self::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBox {
    pub id: String,
    pub title: String,
    pub screen: String,
    pub context: MetaBoxContext,
}

/// Panels registered for the current admin request.
#[derive(Debug, Clone, Default)]
pub struct MetaBoxes {
    boxes: Vec<MetaBox>,
}

impl MetaBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel. Re-registering the same `(id, screen, context)` replaces it.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        screen: impl Into<String>,
        context: MetaBoxContext,
    ) {
        let meta_box = MetaBox {
            id: id.into(),
            title: title.into(),
            screen: screen.into(),
            context,
        };
        self.remove(&meta_box.id, &meta_box.screen, context);
        self.boxes.push(meta_box);
    }

    /// Remove a panel; returns whether it was registered.
    pub fn remove(&mut self, id: &str, screen: &str, context: MetaBoxContext) -> bool {
        let before = self.boxes.len();
        self.boxes
            .retain(|b| !(b.id == id && b.screen == screen && b.context == context));
        self.boxes.len() != before
    }

    pub fn contains(&self, id: &str, screen: &str) -> bool {
        self.boxes.iter().any(|b| b.id == id && b.screen == screen)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaBox> {
        self.boxes.iter()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut boxes = MetaBoxes::new();
        boxes.add("featured", "Featured", "post", MetaBoxContext::Side);
        boxes.add("featured", "Featured", "page", MetaBoxContext::Side);
        assert_eq!(boxes.len(), 2);

        // wrong context leaves it alone
        assert!(!boxes.remove("featured", "post", MetaBoxContext::Normal));
        assert!(boxes.remove("featured", "post", MetaBoxContext::Side));
        assert!(!boxes.contains("featured", "post"));
        assert!(boxes.contains("featured", "page"));
    }

    #[test]
    fn test_add_replaces_duplicate() {
        let mut boxes = MetaBoxes::new();
        boxes.add("featured", "Old", "post", MetaBoxContext::Side);
        boxes.add("featured", "New", "post", MetaBoxContext::Side);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes.iter().next().unwrap().title, "New");
    }

    #[test]
    fn test_context_display() {
        assert_eq!(MetaBoxContext::Side.to_string(), "side");
    }
}
