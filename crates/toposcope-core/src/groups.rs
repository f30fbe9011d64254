//! Handle groups and their display settings

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{GraphError, GraphResult};
use crate::model::{EdgeId, NodeId};
use crate::util::{IterationGuard, OrderedMap};

const GROUP_GUARD_MESSAGE: &str = "cannot add or remove items while iterating over them";

/// Free-form renderer options keyed by option name.
pub type DisplayOptions = BTreeMap<String, Value>;

/// Anything a group can hold.
pub trait Handle: Copy + Eq + Hash + fmt::Debug {
    fn raw(self) -> usize;
}

impl Handle for NodeId {
    fn raw(self) -> usize {
        self.index()
    }
}

impl Handle for EdgeId {
    fn raw(self) -> usize {
        self.index()
    }
}

/// Insertion-ordered set of handles, guarded against mutation while iterated.
#[derive(Debug)]
pub struct GenericGroup<H: Handle> {
    items: OrderedMap<H, ()>,
    guard: IterationGuard,
}

impl<H: Handle> GenericGroup<H> {
    pub fn new() -> Self {
        GenericGroup {
            items: OrderedMap::new(),
            guard: IterationGuard::with_message(GROUP_GUARD_MESSAGE),
        }
    }

    pub fn has_item(&self, handle: H) -> bool {
        self.items.contains_key(&handle)
    }

    /// Adding a handle that is already present is a no-op.
    pub fn add_item(&mut self, handle: H) -> GraphResult<()> {
        self.guard.check()?;
        if !self.has_item(handle) {
            self.items.insert(handle, ());
        }
        Ok(())
    }

    pub fn remove_item(&mut self, handle: H) -> GraphResult<()> {
        self.guard.check()?;
        self.items
            .remove(&handle)
            .ok_or(GraphError::ItemNotInGroup(handle.raw()))
    }

    /// Visit every handle in insertion order.
    pub fn iter_items<B, F>(&mut self, mut callback: F) -> ControlFlow<B>
    where
        F: FnMut(&mut Self, H) -> ControlFlow<B>,
    {
        let _scope = self.guard.enter();
        let items: Vec<H> = self.items.keys().copied().collect();
        items.into_iter().try_for_each(|handle| callback(self, handle))
    }

    pub fn items(&self) -> impl Iterator<Item = H> + '_ {
        self.items.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<H: Handle> Default for GenericGroup<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> FromIterator<H> for GenericGroup<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut group = GenericGroup::new();
        for handle in iter {
            group.items.insert(handle, ());
        }
        group
    }
}

/// A way of drawing the members of a group.
pub trait DisplayMode: Copy + Eq + fmt::Debug + Default {
    fn name(self) -> &'static str;

    /// Options specific to this mode, layered over [`common_display_options`].
    fn default_options(self) -> DisplayOptions;
}

/// Options every mode starts from.
pub fn common_display_options() -> DisplayOptions {
    options(json!({
        "color": 0xFFFFFF,
        "size": 1,
        "opacity": 1.0,
    }))
}

fn options(value: Value) -> DisplayOptions {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => DisplayOptions::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeDisplayMode {
    #[default]
    Sprite,
    Sphere,
}

impl DisplayMode for NodeDisplayMode {
    fn name(self) -> &'static str {
        match self {
            NodeDisplayMode::Sprite => "sprite",
            NodeDisplayMode::Sphere => "sphere",
        }
    }

    fn default_options(self) -> DisplayOptions {
        match self {
            NodeDisplayMode::Sprite => DisplayOptions::new(),
            NodeDisplayMode::Sphere => options(json!({
                "thetaSegments": 3,
                "thetaStart": 0,
                "thetaLength": PI,
                "phiSegments": 2,
                "phiStart": 0,
                "phiLength": 2.0 * PI,
            })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDisplayMode {
    #[default]
    Line,
    Cylinder,
    Arrow,
}

impl DisplayMode for EdgeDisplayMode {
    fn name(self) -> &'static str {
        match self {
            EdgeDisplayMode::Line => "line",
            EdgeDisplayMode::Cylinder => "cylinder",
            EdgeDisplayMode::Arrow => "arrow",
        }
    }

    fn default_options(self) -> DisplayOptions {
        let height = json!({ "heightSegments": 2, "heightStart": 0, "heightLength": 1 });
        let mut result = options(height);
        let extra = match self {
            EdgeDisplayMode::Line => json!({}),
            EdgeDisplayMode::Cylinder => json!({
                "thetaSegments": 3,
                "thetaStart": 0,
                "thetaLength": PI,
            }),
            EdgeDisplayMode::Arrow => json!({
                "headLength": 0.1,
                "headRadius": 1.0,
                "headThetaSegments": 3,
                "headThetaStart": 0,
                "headThetaLength": PI,
            }),
        };
        result.extend(options(extra));
        result
    }
}

/// A group of handles plus how to draw them.
///
/// Display options are merged in three layers, later layers winning: the
/// common defaults, the defaults of the current mode, then whatever options
/// the group already carried (user options).
#[derive(Debug)]
pub struct DisplayGroup<H: Handle, M: DisplayMode> {
    items: GenericGroup<H>,
    display_mode: M,
    display_options: DisplayOptions,
}

pub type NodeGroup = DisplayGroup<NodeId, NodeDisplayMode>;
pub type EdgeGroup = DisplayGroup<EdgeId, EdgeDisplayMode>;

impl<H: Handle, M: DisplayMode> DisplayGroup<H, M> {
    pub fn new(items: impl IntoIterator<Item = H>, mode: M, user_options: DisplayOptions) -> Self {
        let mut group = DisplayGroup {
            items: items.into_iter().collect(),
            display_mode: mode,
            display_options: user_options,
        };
        group.set_display_mode(mode);
        group
    }

    pub fn display_mode(&self) -> M {
        self.display_mode
    }

    /// Switch mode and fill in that mode's defaults under the current options.
    pub fn set_display_mode(&mut self, mode: M) {
        let mut merged = common_display_options();
        merged.extend(mode.default_options());
        merged.extend(std::mem::take(&mut self.display_options));
        self.display_mode = mode;
        self.display_options = merged;
    }

    pub fn display_options(&self) -> &DisplayOptions {
        &self.display_options
    }

    pub fn display_options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display_options
    }

    pub fn items(&self) -> &GenericGroup<H> {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut GenericGroup<H> {
        &mut self.items
    }
}

impl<H: Handle, M: DisplayMode> Default for DisplayGroup<H, M> {
    fn default() -> Self {
        Self::new(std::iter::empty(), M::default(), DisplayOptions::new())
    }
}
