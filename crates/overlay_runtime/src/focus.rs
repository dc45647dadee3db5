//! Focus target selection and Tab wrapping for trapped content.

/// Picks the element to focus when content opens.
///
/// Order: the explicit target, then the first focusable descendant, then the container itself,
/// so focus never stays on page content behind the overlay.
pub fn initial_focus_target<E: Clone>(explicit: Option<&E>, focusables: &[E], container: &E) -> E {
    if let Some(explicit) = explicit {
        return explicit.clone();
    }
    match focusables.first() {
        Some(first) => first.clone(),
        None => {
            tracing::debug!("no focusable descendants; focusing container");
            container.clone()
        }
    }
}

/// Index to focus for a Tab press, or `None` when the default focus move stays inside.
///
/// Focus wraps from the last focusable to the first (and back with `backwards`). Focus outside
/// the list, including on the container, enters at the matching edge.
pub fn cycle_focus<E: PartialEq>(
    focusables: &[E],
    active: Option<&E>,
    backwards: bool,
) -> Option<usize> {
    let last = focusables.len().checked_sub(1)?;
    let position = active.and_then(|active| focusables.iter().position(|el| el == active));
    match (position, backwards) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(index), false) if index == last => Some(0),
        (Some(0), true) => Some(last),
        _ => None,
    }
}
