// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events as the engine sees them.
//!
//! Hosts resolve hit testing themselves and hand over the path from the hit
//! node up to the root, annotated with the few facts the drag gate needs.

use kurbo::Point;
use smallvec::SmallVec;

/// Kind of device that produced a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

impl PointerType {
    /// Movement, in pixels, before a content press counts as a swipe.
    #[must_use]
    pub const fn swipe_start_threshold(self) -> f64 {
        match self {
            Self::Touch => 10.0,
            Self::Mouse | Self::Pen => 2.0,
        }
    }
}

/// One node on the path from a pointer target to the root.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetNode {
    /// Carries the "no drag" marker.
    pub no_drag: bool,
    /// Is a native select control.
    pub is_select: bool,
    /// Content overflows and can scroll.
    pub scrollable: bool,
    /// Current scroll position of a scrollable node.
    pub scroll_top: f64,
    /// Has the dialog role.
    pub is_dialog: bool,
    /// Is the drawer panel itself.
    pub is_panel_root: bool,
}

impl TargetNode {
    /// A plain node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The drawer panel, which also carries the dialog role.
    #[must_use]
    pub fn panel() -> Self {
        Self {
            is_panel_root: true,
            is_dialog: true,
            ..Self::default()
        }
    }

    /// Marks the node as opting out of drags.
    #[must_use]
    pub fn no_drag(mut self) -> Self {
        self.no_drag = true;
        self
    }

    /// Marks the node as a native select control.
    #[must_use]
    pub fn select(mut self) -> Self {
        self.is_select = true;
        self
    }

    /// Marks the node as scrollable, scrolled to `scroll_top`.
    #[must_use]
    pub fn scrollable(mut self, scroll_top: f64) -> Self {
        self.scrollable = true;
        self.scroll_top = scroll_top;
        self
    }
}

/// Target-to-root path of a pointer event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetPath(pub SmallVec<[TargetNode; 8]>);

impl TargetPath {
    /// Path with a single node: the panel itself.
    #[must_use]
    pub fn panel() -> Self {
        Self::from_nodes([TargetNode::panel()])
    }

    /// Builds a path from nodes ordered target first.
    #[must_use]
    pub fn from_nodes(nodes: impl IntoIterator<Item = TargetNode>) -> Self {
        Self(nodes.into_iter().collect())
    }

    /// The hit node.
    #[must_use]
    pub fn target(&self) -> Option<&TargetNode> {
        self.0.first()
    }

    /// Iterates from the target toward the root.
    pub fn iter(&self) -> impl Iterator<Item = &TargetNode> + '_ {
        self.0.iter()
    }

    /// `true` if the path passes through the panel.
    #[must_use]
    pub fn is_inside_panel(&self) -> bool {
        self.0.iter().any(|n| n.is_panel_root)
    }

    /// `true` if the target or an ancestor opts out of drags.
    #[must_use]
    pub fn is_no_drag(&self) -> bool {
        self.0.iter().any(|n| n.no_drag)
    }
}

/// A pointer event delivered to the drawer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer identifier, for capture.
    pub pointer_id: u64,
    /// Page coordinates.
    pub position: Point,
    /// Device kind.
    pub pointer_type: PointerType,
    /// Event time in milliseconds.
    pub time_ms: u64,
    /// Hit path.
    pub target: TargetPath,
}

impl PointerInput {
    /// A mouse event at `position` and `time_ms`, targeting the panel.
    #[must_use]
    pub fn new(position: Point, time_ms: u64) -> Self {
        Self {
            pointer_id: 1,
            position,
            pointer_type: PointerType::Mouse,
            time_ms,
            target: TargetPath::panel(),
        }
    }

    /// Sets the device kind.
    #[must_use]
    pub fn with_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    /// Sets the hit path.
    #[must_use]
    pub fn with_target(mut self, target: TargetPath) -> Self {
        self.target = target;
        self
    }

    /// Sets the pointer id.
    #[must_use]
    pub fn with_pointer_id(mut self, pointer_id: u64) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}
