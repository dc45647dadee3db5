//! Modal actions, side-effect intents, and transition logic.

use thiserror::Error;

use crate::model::{CloseReason, ModalOptions, ModalState};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_modal`].
pub enum ModalAction {
    /// Mirror of the owner's open flag.
    SetOpen(bool),
    /// The content element is attached to the portal node.
    ContentMounted,
    /// Key pressed while focus is inside the content.
    KeyDown {
        /// `KeyboardEvent.key` value.
        key: String,
        /// Whether Shift was held.
        shift: bool,
    },
    /// Pointer press on the backdrop.
    OverlayClicked,
    /// Activation of the close button.
    CloseButtonClicked,
    /// Imperative close from code holding the handle.
    Close,
}

impl ModalAction {
    /// Key action without modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            shift: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_modal`] for the coordinator to execute.
pub enum ModalEffect {
    /// Remember the currently focused element.
    CaptureReturnFocus,
    /// Acquire the document scroll lock.
    LockScroll,
    /// Acquire the portal node.
    MountPortal,
    /// Hide content outside the modal from assistive technology.
    HideOthers,
    /// Focus the initial target inside the content.
    FocusInitial,
    /// Move focus to the next (or previous) focusable inside the content, wrapping at the edges.
    CycleFocus {
        /// Shift+Tab direction.
        backwards: bool,
    },
    /// Ask the owner to clear its open flag.
    RequestClose(CloseReason),
    /// Release the scroll lock, if held.
    UnlockScroll,
    /// Release the portal node, if held.
    UnmountPortal,
    /// Undo [`ModalEffect::HideOthers`], if applied.
    RestoreOthers,
    /// Focus the final-focus target or the captured element.
    ReturnFocus,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Modal lifecycle errors.
pub enum ModalError {
    /// Content was attached while the modal is closed.
    #[error("modal content mounted while closed")]
    NotOpen,
    /// Another owner holds the portal node id.
    #[error("portal node `{0}` is already mounted by another owner")]
    PortalBusy(String),
}

const TEARDOWN: [ModalEffect; 4] = [
    ModalEffect::UnlockScroll,
    ModalEffect::UnmountPortal,
    ModalEffect::RestoreOthers,
    ModalEffect::ReturnFocus,
];

/// Applies a [`ModalAction`] to `state` and collects the effects to execute.
///
/// Closing always emits the full release sequence, even from [`ModalState::Closed`], so a
/// partially completed open is still unwound. Release effects are idempotent on the executor side.
///
/// # Errors
///
/// Returns [`ModalError::NotOpen`] when content mounts while the modal is closed.
pub fn reduce_modal(
    state: &mut ModalState,
    options: &ModalOptions,
    action: ModalAction,
) -> Result<Vec<ModalEffect>, ModalError> {
    let mut effects = Vec::new();
    match action {
        ModalAction::SetOpen(true) => {
            if state.is_open() {
                return Ok(effects);
            }
            *state = ModalState::Open {
                content_mounted: false,
            };
            effects.push(ModalEffect::CaptureReturnFocus);
            if options.block_scroll_on_mount {
                effects.push(ModalEffect::LockScroll);
            }
            effects.push(ModalEffect::MountPortal);
        }
        ModalAction::SetOpen(false) => {
            *state = ModalState::Closed;
            effects.extend(TEARDOWN);
        }
        ModalAction::ContentMounted => match *state {
            ModalState::Closed => return Err(ModalError::NotOpen),
            ModalState::Open {
                content_mounted: true,
            } => {}
            ModalState::Open {
                content_mounted: false,
            } => {
                *state = ModalState::Open {
                    content_mounted: true,
                };
                if options.use_inert {
                    effects.push(ModalEffect::HideOthers);
                }
                effects.push(ModalEffect::FocusInitial);
            }
        },
        ModalAction::KeyDown { key, shift } => {
            if !state.is_open() {
                return Ok(effects);
            }
            match key.as_str() {
                "Escape" | "Esc" if options.close_on_esc => {
                    effects.push(ModalEffect::RequestClose(CloseReason::PressedEscape));
                }
                "Tab" if state.is_content_mounted() => {
                    effects.push(ModalEffect::CycleFocus { backwards: shift });
                }
                _ => {}
            }
        }
        ModalAction::OverlayClicked => {
            if state.is_open() && options.close_on_overlay_click {
                effects.push(ModalEffect::RequestClose(CloseReason::ClickedOverlay));
            }
        }
        ModalAction::CloseButtonClicked => {
            if state.is_open() {
                effects.push(ModalEffect::RequestClose(CloseReason::CloseButton));
            }
        }
        ModalAction::Close => {
            let was_open = state.is_open();
            *state = ModalState::Closed;
            effects.extend(TEARDOWN);
            if was_open {
                effects.push(ModalEffect::RequestClose(CloseReason::Programmatic));
            }
        }
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn open(state: &mut ModalState, options: &ModalOptions) {
        let _ = reduce_modal(state, options, ModalAction::SetOpen(true)).expect("open");
        let _ = reduce_modal(state, options, ModalAction::ContentMounted).expect("mount");
    }

    #[test]
    fn open_acquires_in_order() {
        let mut state = ModalState::Closed;
        let options = ModalOptions::default();
        let effects =
            reduce_modal(&mut state, &options, ModalAction::SetOpen(true)).expect("open");
        assert_eq!(
            effects,
            vec![
                ModalEffect::CaptureReturnFocus,
                ModalEffect::LockScroll,
                ModalEffect::MountPortal
            ]
        );
        let effects =
            reduce_modal(&mut state, &options, ModalAction::ContentMounted).expect("mount");
        assert_eq!(
            effects,
            vec![ModalEffect::HideOthers, ModalEffect::FocusInitial]
        );
        assert!(state.is_content_mounted());
    }

    #[test]
    fn disabled_options_skip_scroll_lock_and_inert() {
        let mut state = ModalState::Closed;
        let options = ModalOptions {
            block_scroll_on_mount: false,
            use_inert: false,
            ..ModalOptions::default()
        };
        let mut effects =
            reduce_modal(&mut state, &options, ModalAction::SetOpen(true)).expect("open");
        effects.extend(
            reduce_modal(&mut state, &options, ModalAction::ContentMounted).expect("mount"),
        );
        assert!(!effects.contains(&ModalEffect::LockScroll));
        assert!(!effects.contains(&ModalEffect::HideOthers));
    }

    #[test]
    fn reopening_while_open_is_a_no_op() {
        let mut state = ModalState::Closed;
        let options = ModalOptions::default();
        open(&mut state, &options);
        let effects =
            reduce_modal(&mut state, &options, ModalAction::SetOpen(true)).expect("reopen");
        assert!(effects.is_empty());
        assert!(state.is_content_mounted());
    }

    #[test]
    fn close_always_emits_release_sequence() {
        let mut state = ModalState::Closed;
        let options = ModalOptions::default();
        let effects =
            reduce_modal(&mut state, &options, ModalAction::SetOpen(false)).expect("close");
        assert_eq!(effects, TEARDOWN.to_vec());
        assert_eq!(state, ModalState::Closed);
    }

    #[test]
    fn escape_and_overlay_respect_options() {
        let mut state = ModalState::Closed;
        let options = ModalOptions {
            close_on_esc: false,
            ..ModalOptions::default()
        };
        open(&mut state, &options);
        assert!(reduce_modal(&mut state, &options, ModalAction::key("Escape"))
            .expect("escape")
            .is_empty());
        assert_eq!(
            reduce_modal(&mut state, &options, ModalAction::OverlayClicked).expect("overlay"),
            vec![ModalEffect::RequestClose(CloseReason::ClickedOverlay)]
        );
        assert!(state.is_open());
    }

    #[test]
    fn tab_cycles_only_after_content_mounts() {
        let mut state = ModalState::Closed;
        let options = ModalOptions::default();
        let _ = reduce_modal(&mut state, &options, ModalAction::SetOpen(true)).expect("open");
        let tab = ModalAction::KeyDown {
            key: "Tab".to_string(),
            shift: true,
        };
        assert!(reduce_modal(&mut state, &options, tab.clone())
            .expect("tab")
            .is_empty());
        let _ = reduce_modal(&mut state, &options, ModalAction::ContentMounted).expect("mount");
        assert_eq!(
            reduce_modal(&mut state, &options, tab).expect("tab"),
            vec![ModalEffect::CycleFocus { backwards: true }]
        );
    }

    #[test]
    fn imperative_close_notifies_owner_once() {
        let mut state = ModalState::Closed;
        let options = ModalOptions::default();
        open(&mut state, &options);
        let first = reduce_modal(&mut state, &options, ModalAction::Close).expect("close");
        assert_eq!(
            first.last(),
            Some(&ModalEffect::RequestClose(CloseReason::Programmatic))
        );
        let second = reduce_modal(&mut state, &options, ModalAction::Close).expect("close");
        assert_eq!(second, TEARDOWN.to_vec());
    }

    #[test]
    fn content_mount_while_closed_is_rejected() {
        let mut state = ModalState::Closed;
        let err = reduce_modal(
            &mut state,
            &ModalOptions::default(),
            ModalAction::ContentMounted,
        )
        .expect_err("closed");
        assert_eq!(err, ModalError::NotOpen);
    }
}
