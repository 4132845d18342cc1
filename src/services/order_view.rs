//! Local-then-confirm ordering for a dashboard view
//!
//! A drag applies to the local order immediately. The authoritative list
//! returned by a successful reorder replaces both orders; a failed reorder
//! restores the last confirmed order.

use crate::storage::Link;

#[derive(Debug, Clone, Default)]
pub struct LinkOrderView {
    confirmed: Vec<Link>,
    local: Vec<Link>,
}

impl LinkOrderView {
    pub fn new(links: Vec<Link>) -> Self {
        Self {
            local: links.clone(),
            confirmed: links,
        }
    }

    /// What the view should currently render
    pub fn links(&self) -> &[Link] {
        &self.local
    }

    /// Ids in local order, suitable for a reorder request
    pub fn ordered_ids(&self) -> Vec<String> {
        self.local.iter().map(|l| l.id.clone()).collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.local
            .iter()
            .map(|l| &l.id)
            .ne(self.confirmed.iter().map(|l| &l.id))
    }

    /// Move the item at `from` so it ends up at index `to`
    ///
    /// Returns false and leaves the order unchanged when either index is out
    /// of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.local.len();
        if from >= len || to >= len {
            return false;
        }
        let item = self.local.remove(from);
        self.local.insert(to, item);
        true
    }

    /// Adopt the list returned by the store
    pub fn confirm(&mut self, authoritative: Vec<Link>) {
        self.local = authoritative.clone();
        self.confirmed = authoritative;
    }

    /// Drop local changes after a failed reorder
    pub fn revert(&mut self) {
        self.local = self.confirmed.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(id: &str, position: i32) -> Link {
        let now = Utc::now();
        Link {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            title: id.to_uppercase(),
            url: format!("https://example.com/{}", id),
            description: None,
            icon: None,
            position,
            is_active: true,
            click_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn view() -> LinkOrderView {
        LinkOrderView::new(vec![link("a", 0), link("b", 1), link("c", 2)])
    }

    #[test]
    fn test_move_item_matches_array_move() {
        let mut v = view();
        assert!(v.move_item(2, 0));
        assert_eq!(v.ordered_ids(), ["c", "a", "b"]);
        assert!(v.is_dirty());

        let mut v = view();
        assert!(v.move_item(0, 2));
        assert_eq!(v.ordered_ids(), ["b", "c", "a"]);
    }

    #[test]
    fn test_move_item_out_of_range_is_noop() {
        let mut v = view();
        assert!(!v.move_item(3, 0));
        assert!(!v.move_item(0, 5));
        assert_eq!(v.ordered_ids(), ["a", "b", "c"]);
        assert!(!v.is_dirty());
    }

    #[test]
    fn test_revert_restores_confirmed_order() {
        let mut v = view();
        v.move_item(1, 0);
        v.revert();
        assert_eq!(v.ordered_ids(), ["a", "b", "c"]);
    }

    #[test]
    fn test_confirm_adopts_authoritative_list() {
        let mut v = view();
        v.move_item(2, 0);
        v.confirm(vec![link("c", 0), link("a", 1), link("b", 2)]);
        assert!(!v.is_dirty());
        v.revert();
        assert_eq!(v.ordered_ids(), ["c", "a", "b"]);
        assert_eq!(v.links()[0].position, 0);
    }
}
