//! Validated WGSL shader module creation.
//!
//! wgpu reports shader problems through its uncaptured-error handler, which
//! panics by default. Startup shader compilation instead runs inside a
//! validation error scope so the driver's diagnostic text can be captured
//! verbatim and surfaced to the operator before the process exits.

use thiserror::Error;

/// Errors from shader module or pipeline creation.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The WGSL source was rejected. Carries the driver's diagnostic text.
    #[error("shader '{name}' failed to compile:\n{message}")]
    CompilationFailed { name: String, message: String },

    /// Both entry points compiled but the pipeline could not be created
    /// against the declared bind group and vertex layouts.
    #[error("pipeline '{name}' failed to link:\n{message}")]
    LinkFailed { name: String, message: String },
}

/// Compile a WGSL module, capturing any validation diagnostic as an error.
///
/// Vertex and fragment stages live in one module; stage selection happens
/// later by entry-point name at pipeline creation.
pub fn compile(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(error) = pollster::block_on(scope.pop()) {
        return Err(ShaderError::CompilationFailed {
            name: name.to_string(),
            message: error.to_string(),
        });
    }

    log::debug!("Compiled shader '{name}'");
    Ok(module)
}

/// Run a pipeline-creation closure inside a validation error scope,
/// converting any diagnostic into [`ShaderError::LinkFailed`].
pub(crate) fn link_scope<T>(
    device: &wgpu::Device,
    name: &str,
    create: impl FnOnce() -> T,
) -> Result<T, ShaderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    if let Some(error) = pollster::block_on(scope.pop()) {
        return Err(ShaderError::LinkFailed {
            name: name.to_string(),
            message: error.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SHADER: &str = r#"
        @vertex
        fn vs_main(@builtin(vertex_index) idx: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    const INVALID_SHADER: &str = r#"
        @vertex
        fn vs_main() -> @builtin(position) vec4<f32> {
            return undeclared_variable;
        }
    "#;

    fn create_test_device() -> Option<wgpu::Device> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions::default())
                .await
                .ok()?;

            let (device, _queue) = adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .ok()?;

            Some(device)
        })
    }

    #[test]
    fn test_valid_shader_compiles() {
        let Some(device) = create_test_device() else {
            return;
        };
        assert!(compile(&device, "valid", VALID_SHADER).is_ok());
    }

    #[test]
    fn test_invalid_shader_surfaces_diagnostic() {
        let Some(device) = create_test_device() else {
            return;
        };
        let err = compile(&device, "broken", INVALID_SHADER).unwrap_err();
        match err {
            ShaderError::CompilationFailed { name, message } => {
                assert_eq!(name, "broken");
                // The driver log must come through verbatim, not be swallowed.
                assert!(!message.is_empty());
            }
            other => panic!("expected CompilationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_error_display_includes_log() {
        let err = ShaderError::CompilationFailed {
            name: "height-field".to_string(),
            message: "unknown identifier 'heigth'".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("height-field"));
        assert!(text.contains("unknown identifier 'heigth'"));
    }
}
