//! Multi-path aggregation: grow, fit and mesh every configured vine into one
//! set of buffers

use glam::Vec3;
use log::{debug, info};

use crate::collision::{RayCaster, RayHit, TryCaster};
use crate::config::VineConfig;
use crate::error::{Result, VineError};
use crate::growth::{path_seed, GrowthPath, RayGrowthStepper};
use crate::mesh::{MeshBuffers, MeshGenerator, PathMeshInfo};

/// Merged geometry of all paths plus where each path landed in it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VineMesh {
    pub buffers: MeshBuffers,
    pub paths: Vec<PathMeshInfo>,
}

impl VineMesh {
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}

pub struct VineGenerator {
    config: VineConfig,
}

impl VineGenerator {
    /// Validates `config` up front so generation cannot fail on it later
    pub fn new(config: VineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VineConfig {
        &self.config
    }

    /// Growth paths for every seed, in path order
    pub fn grow_paths<C: RayCaster + ?Sized>(&self, caster: &mut C) -> Result<Vec<GrowthPath>> {
        self.config
            .seeds()
            .into_iter()
            .enumerate()
            .map(|(index, seed)| -> Result<GrowthPath> {
                let rng_seed = path_seed(self.config.paths.base_seed, index);
                let mut stepper = RayGrowthStepper::seeded(self.config.growth, rng_seed)?;
                Ok(stepper.grow(seed, &mut *caster))
            })
            .collect()
    }

    /// Regenerate the whole vine mesh against `caster`
    pub fn generate<C: RayCaster + ?Sized>(&self, caster: &mut C) -> Result<VineMesh> {
        let growth = self.grow_paths(caster)?;

        let segments = self.config.growth.steps.max(1);
        let tube = &self.config.tube;
        let leaves = &self.config.leaves;
        let mut buffers = MeshBuffers::with_capacity(
            growth.len() * (tube.vertex_count(segments) + leaves.vertex_count(segments)),
            growth.len() * tube.index_count(segments),
            growth.len() * leaves.index_count(segments),
        );

        let generator = MeshGenerator::new(tube.clone(), *leaves, self.config.host_transform)?;
        let mut paths = Vec::with_capacity(growth.len());
        for (index, path) in growth.iter().enumerate() {
            let info = generator.generate_tracked(index, path, &mut buffers)?;
            debug!(
                "path {}: {} points, {} surface hits, {} vertices",
                index,
                path.len(),
                info.growth_hits,
                info.vertex_count
            );
            paths.push(info);
        }
        buffers.calculate_bounds();

        info!(
            "generated {} paths: {} vertices, {} tube triangles, {} leaf triangles",
            paths.len(),
            buffers.vertex_count(),
            buffers.tube_indices.len() / 3,
            buffers.leaf_indices.len() / 3
        );

        Ok(VineMesh { buffers, paths })
    }

    /// [`Self::generate`] against a fallible query; any failed query discards
    /// the whole result
    pub fn try_generate<F>(&self, query: F) -> Result<VineMesh>
    where
        F: FnMut(Vec3, Vec3, f32) -> std::result::Result<Option<RayHit>, String>,
    {
        let mut caster = TryCaster::new(query);
        let mesh = self.generate(&mut caster);
        caster.finish(mesh).map_err(VineError::RayCast)?
    }
}
