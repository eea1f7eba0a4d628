/// An element of an orderable sibling list: top-level sidebar items, the
/// submenu of one sidebar item, or the dashboard blocks.
pub trait LayoutEntry: Clone {
    /// Stable identifier, unique across every nesting level of a collection.
    fn id(&self) -> &str;

    fn order(&self) -> i32;

    fn set_order(&mut self, order: i32);

    fn is_custom(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    fn set_name(&mut self, name: String);
}

/// Moves `source_id` to the position currently held by `target_id` and
/// re-derives `order` for the whole list.
///
/// Unknown ids and `source_id == target_id` return the list unchanged: a drag
/// end can reference an id that a concurrent mutation already removed.
pub fn reorder<T: LayoutEntry>(list: &[T], source_id: &str, target_id: &str) -> Vec<T> {
    if source_id == target_id {
        return list.to_vec();
    }
    let source_index = list.iter().position(|e| e.id() == source_id);
    let target_index = list.iter().position(|e| e.id() == target_id);
    let (Some(source_index), Some(target_index)) = (source_index, target_index) else {
        return list.to_vec();
    };

    let mut result = list.to_vec();
    let moved = result.remove(source_index);
    result.insert(target_index, moved);
    reindex(&mut result);
    result
}

/// Like `reorder`, but positions are taken from the list sorted by `order`,
/// which is what the drag surface shows. Storage may hold the entries in any
/// sequence.
pub fn reorder_sorted<T: LayoutEntry>(list: &[T], source_id: &str, target_id: &str) -> Vec<T> {
    let known = |id: &str| list.iter().any(|e| e.id() == id);
    if source_id == target_id || !known(source_id) || !known(target_id) {
        return list.to_vec();
    }
    reorder(&sort_by_order(list), source_id, target_id)
}

/// Assigns `order = index` left to right.
pub fn reindex<T: LayoutEntry>(list: &mut [T]) {
    for (index, entry) in list.iter_mut().enumerate() {
        entry.set_order(index as i32);
    }
}

/// Stable sort by the `order` field; ties keep collection order.
pub fn sort_by_order<T: LayoutEntry>(list: &[T]) -> Vec<T> {
    let mut sorted = list.to_vec();
    sorted.sort_by_key(|e| e.order());
    sorted
}

/// Newest-first insertion: every existing sibling shifts by +1 and `entry`
/// takes order 0 at the head of the list.
pub fn prepend<T: LayoutEntry>(list: &[T], mut entry: T) -> Vec<T> {
    entry.set_order(0);
    let mut result = Vec::with_capacity(list.len() + 1);
    result.push(entry);
    result.extend(list.iter().cloned().map(|mut e| {
        e.set_order(e.order() + 1);
        e
    }));
    result
}

/// Flips `visible` on the entry with `id`. Returns `true` if it was found.
pub fn toggle_in<T: LayoutEntry>(list: &mut [T], id: &str) -> bool {
    match list.iter_mut().find(|e| e.id() == id) {
        Some(entry) => {
            let visible = entry.is_visible();
            entry.set_visible(!visible);
            true
        }
        None => false,
    }
}

/// Renames the entry with `id`. Returns `true` if it was found.
pub fn rename_in<T: LayoutEntry>(list: &mut [T], id: &str, name: &str) -> bool {
    match list.iter_mut().find(|e| e.id() == id) {
        Some(entry) => {
            entry.set_name(name.to_string());
            true
        }
        None => false,
    }
}

/// Removes the entry with `id` when it is custom. Built-in entries stay.
/// Returns `true` if an entry with `id` exists at this level.
pub fn remove_custom_in<T: LayoutEntry>(list: &mut Vec<T>, id: &str) -> bool {
    match list.iter().position(|e| e.id() == id) {
        Some(index) => {
            if list[index].is_custom() {
                list.remove(index);
            }
            true
        }
        None => false,
    }
}
