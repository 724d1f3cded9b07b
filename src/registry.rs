//! Type name to constructor lookup used by [`crate::Canvas::create`].

use std::collections::BTreeMap;
use std::fmt;

use egui::{Pos2, Vec2};

use crate::blueprint::Blueprint;
use crate::error::{ShapeError, ShapeResult};

/// Arguments handed to a shape constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeArgs {
    /// Requested tag; an empty name lets the canvas pick one.
    pub name: String,
    pub position: Pos2,
    pub size: Option<Vec2>,
    pub coords: Vec<Pos2>,
    pub endpoints: Option<(Pos2, Pos2)>,
}

impl ShapeArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Pos2::new(x, y);
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Vec2::new(width, height));
        self
    }

    pub fn coords(mut self, coords: impl IntoIterator<Item = Pos2>) -> Self {
        self.coords = coords.into_iter().collect();
        self
    }

    pub fn endpoints(mut self, start: Pos2, end: Pos2) -> Self {
        self.endpoints = Some((start, end));
        self
    }
}

/// Canvas state a constructor may need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildContext {
    pub zoom: f32,
    pub wire_curve_offset: f32,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            wire_curve_offset: 20.0,
        }
    }
}

pub type Constructor = Box<dyn Fn(&ShapeArgs, &BuildContext) -> ShapeResult<Blueprint>>;

#[derive(Default)]
pub struct Registry {
    constructors: BTreeMap<String, Constructor>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `type_name` with `constructor`. The last registration wins.
    pub fn register<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn(&ShapeArgs, &BuildContext) -> ShapeResult<Blueprint> + 'static,
    {
        let type_name = type_name.into();
        if self
            .constructors
            .insert(type_name.clone(), Box::new(constructor))
            .is_some()
        {
            log::debug!("Replaced constructor for {type_name}");
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub fn build(
        &self,
        type_name: &str,
        args: &ShapeArgs,
        ctx: &BuildContext,
    ) -> ShapeResult<Blueprint> {
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| ShapeError::UnknownType(type_name.to_owned()))?;
        constructor(args, ctx)
    }
}
