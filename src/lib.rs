use glam::Vec3;
use js_sys::{Array, Float32Array, Function};
use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod collision;
pub mod config;
pub mod error;
pub mod growth;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod vine;

pub use config::VineConfig;
pub use error::{ConfigError, VineError};
pub use vine::{VineGenerator, VineMesh};

use collision::{NoCollision, RayHit};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already installed when the module is instantiated twice
    let _ = logging::init(LevelFilter::Info);
}

/// Vine generator state exposed to JavaScript
#[wasm_bindgen]
pub struct VineEngine {
    generator: VineGenerator,
    mesh: VineMesh,
}

#[wasm_bindgen]
impl VineEngine {
    /// Create an engine from a YAML configuration document (may be empty)
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: &str) -> Result<VineEngine, JsValue> {
        let generator = VineConfig::from_yaml(config_yaml)
            .and_then(VineGenerator::new)
            .map_err(to_js)?;

        Ok(Self {
            generator,
            mesh: VineMesh::default(),
        })
    }

    /// Replace the configuration and drop the mesh built from the old one.
    ///
    /// If `yaml` is invalid both the configuration and the mesh are kept.
    #[wasm_bindgen]
    pub fn load_config(&mut self, yaml: &str) -> Result<(), JsValue> {
        self.generator = VineConfig::from_yaml(yaml)
            .and_then(VineGenerator::new)
            .map_err(to_js)?;
        self.mesh = VineMesh::default();
        Ok(())
    }

    /// Current configuration as YAML
    #[wasm_bindgen]
    pub fn config_yaml(&self) -> Result<String, JsValue> {
        self.generator.config().to_yaml().map_err(to_js)
    }

    /// Regenerate against a JS ray query.
    ///
    /// `cast(origin, direction, maxDistance)` receives two 3-element
    /// `Float32Array`s and a number, and returns `null`/`undefined` for a miss
    /// or `[px, py, pz, nx, ny, nz]` for a hit. If it throws or returns
    /// anything else, the previous mesh is kept and the error is rethrown.
    /// Returns the new vertex count.
    #[wasm_bindgen]
    pub fn regenerate(&mut self, cast: &Function) -> Result<usize, JsValue> {
        let mesh = self
            .generator
            .try_generate(|origin, direction, max_distance| js_cast(cast, origin, direction, max_distance))
            .map_err(to_js)?;
        Ok(self.replace_mesh(mesh))
    }

    /// Regenerate with nothing to collide with; every step is a free-space step
    #[wasm_bindgen]
    pub fn regenerate_unobstructed(&mut self) -> Result<usize, JsValue> {
        let mesh = self.generator.generate(&mut NoCollision).map_err(to_js)?;
        Ok(self.replace_mesh(mesh))
    }

    fn replace_mesh(&mut self, mesh: VineMesh) -> usize {
        self.mesh = mesh;
        self.mesh.vertex_count()
    }

    // === Mesh buffers ===

    /// Flat xyz positions in host-local space
    #[wasm_bindgen]
    pub fn positions(&self) -> Vec<f32> {
        flatten3(&self.mesh.buffers.positions)
    }

    #[wasm_bindgen]
    pub fn normals(&self) -> Vec<f32> {
        flatten3(&self.mesh.buffers.normals)
    }

    #[wasm_bindgen]
    pub fn uvs(&self) -> Vec<f32> {
        self.mesh.buffers.uvs.iter().flat_map(|uv| uv.to_array()).collect()
    }

    #[wasm_bindgen]
    pub fn tube_indices(&self) -> Vec<u32> {
        self.mesh.buffers.tube_indices.clone()
    }

    #[wasm_bindgen]
    pub fn leaf_indices(&self) -> Vec<u32> {
        self.mesh.buffers.leaf_indices.clone()
    }

    /// Interleaved position(3) + normal(3) + uv(2) per vertex
    #[wasm_bindgen]
    pub fn vertex_data(&self) -> Vec<f32> {
        self.mesh.buffers.vertex_data()
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen]
    pub fn path_count(&self) -> usize {
        self.mesh.path_count()
    }

    /// Six numbers per path: vertex start/count, tube index start/count,
    /// leaf index start/count
    #[wasm_bindgen]
    pub fn path_ranges(&self) -> Vec<u32> {
        self.mesh
            .paths
            .iter()
            .flat_map(|p| {
                [
                    p.vertex_start,
                    p.vertex_count,
                    p.tube_index_start,
                    p.tube_index_count,
                    p.leaf_index_start,
                    p.leaf_index_count,
                ]
            })
            .collect()
    }

    #[wasm_bindgen]
    pub fn bounds_center(&self) -> Vec<f32> {
        self.mesh.buffers.bounds_center.to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn bounds_radius(&self) -> f32 {
        self.mesh.buffers.bounds_radius
    }

    // === Grow cycle ===

    /// Value for the material's grow parameter at `time` seconds
    #[wasm_bindgen]
    pub fn grow_value(&self, time: f32) -> f32 {
        self.generator.config().grow_cycle.value_at(time)
    }

    /// Set the console log level ("off", "error", "warn", "info", "debug", "trace")
    #[wasm_bindgen]
    pub fn set_log_level(level: &str) -> Result<(), JsValue> {
        let filter: LevelFilter = level
            .parse()
            .map_err(|_| JsValue::from_str(&format!("unknown log level '{}'", level)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

fn to_js(err: VineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn flatten3(values: &[Vec3]) -> Vec<f32> {
    values.iter().flat_map(|v| v.to_array()).collect()
}

fn js_cast(cast: &Function, origin: Vec3, direction: Vec3, max_distance: f32) -> Result<Option<RayHit>, String> {
    let origin = Float32Array::from(&origin.to_array()[..]);
    let direction = Float32Array::from(&direction.to_array()[..]);
    let result = cast
        .call3(&JsValue::NULL, &origin, &direction, &JsValue::from_f64(max_distance as f64))
        .map_err(|e| describe_js_error(&e))?;

    if result.is_null() || result.is_undefined() {
        return Ok(None);
    }
    if !Array::is_array(&result) {
        return Err(format!("ray callback returned {:?}, expected an array or null", result));
    }

    let values: Vec<Option<f64>> = Array::from(&result).iter().map(|v| v.as_f64()).collect();
    hit_from_values(&values).map(Some)
}

fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Parse `[px, py, pz, nx, ny, nz]` returned by a host ray query
fn hit_from_values(values: &[Option<f64>]) -> Result<RayHit, String> {
    if values.len() != 6 {
        return Err(format!("ray hit needs 6 numbers, got {}", values.len()));
    }

    let mut numbers = [0.0f32; 6];
    for (i, (slot, value)) in numbers.iter_mut().zip(values).enumerate() {
        match value {
            Some(v) if v.is_finite() => *slot = *v as f32,
            _ => return Err(format!("ray hit element {} is not a finite number", i)),
        }
    }

    let point = Vec3::new(numbers[0], numbers[1], numbers[2]);
    let normal = Vec3::new(numbers[3], numbers[4], numbers[5])
        .try_normalize()
        .ok_or_else(|| "ray hit normal has zero length".to_string())?;
    Ok(RayHit::new(point, normal))
}
