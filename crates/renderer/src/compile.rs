use std::borrow::Cow;
use std::path::Path;

use wgpu::naga::ShaderStage;

use crate::error::{ShaderStageKind, ViewerError};

/// GLSL source for one stage plus the label used in logs and errors.
#[derive(Debug, Clone)]
pub(crate) struct StageSource {
    pub label: String,
    pub code: Cow<'static, str>,
}

#[derive(Debug, Clone)]
pub(crate) struct ShaderSources {
    pub vertex: StageSource,
    pub fragment: StageSource,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            vertex: StageSource {
                label: "built-in vertex".to_string(),
                code: Cow::Borrowed(VERTEX_SHADER_GLSL),
            },
            fragment: StageSource {
                label: "built-in fragment".to_string(),
                code: Cow::Borrowed(FRAGMENT_SHADER_GLSL),
            },
        }
    }
}

/// Resolves the GLSL for both stages, reading override files when given.
pub(crate) fn load_sources(
    vertex: Option<&Path>,
    fragment: Option<&Path>,
) -> Result<ShaderSources, ViewerError> {
    let mut sources = ShaderSources::default();
    if let Some(path) = vertex {
        sources.vertex = read_stage(path)?;
    }
    if let Some(path) = fragment {
        sources.fragment = read_stage(path)?;
    }
    Ok(sources)
}

fn read_stage(path: &Path) -> Result<StageSource, ViewerError> {
    let code = std::fs::read_to_string(path).map_err(|err| ViewerError::shader(path, err))?;
    if code.trim().is_empty() {
        return Err(ViewerError::shader(path, "file is empty"));
    }
    Ok(StageSource {
        label: path.display().to_string(),
        code: Cow::Owned(code),
    })
}

/// Compiles GLSL through wgpu's naga frontend.
///
/// Validation errors are captured with an error scope so a bad override file
/// becomes a [`ViewerError::Compile`] instead of an uncaptured device error.
pub(crate) fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStageKind,
    source: &StageSource,
) -> Result<wgpu::ShaderModule, ViewerError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&source.label),
        source: wgpu::ShaderSource::Glsl {
            shader: source.code.clone(),
            stage: naga_stage(stage),
            defines: &[],
        },
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(ViewerError::Compile {
            stage,
            label: source.label.clone(),
            message: error.to_string(),
        });
    }
    tracing::debug!(%stage, label = %source.label, "compiled shader stage");
    Ok(module)
}

fn naga_stage(stage: ShaderStageKind) -> ShaderStage {
    match stage {
        ShaderStageKind::Vertex => ShaderStage::Vertex,
        ShaderStageKind::Fragment => ShaderStage::Fragment,
    }
}

/// Uniform block shared by both stages. Must match `ViewUniforms`.
macro_rules! view_params_block {
    () => {
        r"
layout(std140, set = 0, binding = 0) uniform ViewParams {
    vec2 pan;
    float zoom;
    float theta;
    vec3 bias;
    float hue;
    int grayscale;
    int channel_filter;
    int blur;
    int padding0;
    vec2 texture_size;
    vec2 surface_scale;
} ubo;
"
    };
}

/// Places the quad: pan first, then rotate by `-theta`, then zoom. The final
/// `surface_scale` keeps image pixels square on non-square windows.
pub(crate) const VERTEX_SHADER_GLSL: &str = concat!(
    "#version 450\n",
    r"
layout(location = 0) in vec2 a_position;
layout(location = 1) in vec2 a_uv;
layout(location = 0) out vec2 v_uv;
",
    view_params_block!(),
    r"
void main() {
    vec2 p = a_position + ubo.pan;
    float c = cos(ubo.theta);
    float s = sin(ubo.theta);
    vec2 r = vec2(c * p.x + s * p.y, -s * p.x + c * p.y);
    gl_Position = vec4(r * ubo.zoom * ubo.surface_scale, 0.0, 1.0);
    v_uv = a_uv;
}
"
);

/// Samples the image and applies whichever filter family is active, then
/// the channel bias when hue mode is on.
pub(crate) const FRAGMENT_SHADER_GLSL: &str = concat!(
    "#version 450\n",
    r"
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 out_color;
",
    view_params_block!(),
    r"
layout(set = 1, binding = 0) uniform texture2D u_image;
layout(set = 1, binding = 1) uniform sampler u_sampler;

vec3 fetch(vec2 offset) {
    vec2 texel = vec2(1.0) / max(ubo.texture_size, vec2(1.0));
    return textureLod(sampler2D(u_image, u_sampler), v_uv + offset * texel, 0.0).rgb;
}

vec3 apply_grayscale(vec3 c) {
    float hi = max(max(c.r, c.g), c.b);
    float lo = min(min(c.r, c.g), c.b);
    float g = lo;
    if (ubo.grayscale == 1) {
        g = (c.r + c.g + c.b) / 3.0;
    } else if (ubo.grayscale == 2) {
        g = dot(c, vec3(0.299, 0.587, 0.114));
    } else if (ubo.grayscale == 3) {
        g = dot(c, vec3(0.2126, 0.7152, 0.0722));
    } else if (ubo.grayscale == 4) {
        g = (hi + lo) * 0.5;
    } else if (ubo.grayscale == 5) {
        g = hi;
    }
    return vec3(g);
}

vec3 apply_channel_filter(vec3 center) {
    vec3 tl = fetch(vec2(-1.0, -1.0));
    vec3 tc = fetch(vec2(0.0, -1.0));
    vec3 tr = fetch(vec2(1.0, -1.0));
    vec3 ml = fetch(vec2(-1.0, 0.0));
    vec3 mr = fetch(vec2(1.0, 0.0));
    vec3 bl = fetch(vec2(-1.0, 1.0));
    vec3 bc = fetch(vec2(0.0, 1.0));
    vec3 br = fetch(vec2(1.0, 1.0));
    if (ubo.channel_filter == 1) {
        return abs((tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl));
    }
    if (ubo.channel_filter == 2) {
        return abs((bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr));
    }
    return 5.0 * center - tc - ml - mr - bc;
}

vec3 apply_blur(int radius) {
    float sigma = float(radius) * 0.5 + 0.5;
    float denom = 2.0 * sigma * sigma;
    vec3 sum = vec3(0.0);
    float total = 0.0;
    for (int y = -3; y <= 3; y++) {
        for (int x = -3; x <= 3; x++) {
            if (x * x <= radius * radius && y * y <= radius * radius) {
                float w = exp(-float(x * x + y * y) / denom);
                sum += fetch(vec2(float(x), float(y))) * w;
                total += w;
            }
        }
    }
    return sum / total;
}

void main() {
    vec3 color = fetch(vec2(0.0));
    if (ubo.grayscale != 0) {
        color = apply_grayscale(color);
    } else if (ubo.channel_filter != 0) {
        color = apply_channel_filter(color);
    } else if (ubo.blur != 0) {
        color = apply_blur(ubo.blur);
    }
    if (ubo.hue > 0.5) {
        color = color + ubo.bias;
    }
    out_color = vec4(clamp(color, vec3(0.0), vec3(1.0)), 1.0);
}
"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use wgpu::naga::front::glsl::{Frontend, Options};
    use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};
    use wgpu::naga::{Module, TypeInner};

    use crate::gpu::uniform_member_offsets;

    fn parse(stage: ShaderStage, source: &str) -> Module {
        let mut frontend = Frontend::default();
        frontend
            .parse(&Options::from(stage), source)
            .unwrap_or_else(|err| panic!("{stage:?} shader failed to parse: {err:?}"))
    }

    fn validate(module: &Module) {
        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(module)
            .unwrap_or_else(|err| panic!("shader failed validation: {err:?}"));
    }

    fn block_offsets(module: &Module) -> Vec<(String, u32)> {
        module
            .types
            .iter()
            .find_map(|(_, ty)| match &ty.inner {
                TypeInner::Struct { members, .. }
                    if members.iter().any(|m| m.name.as_deref() == Some("zoom")) =>
                {
                    Some(
                        members
                            .iter()
                            .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
                            .collect(),
                    )
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn built_in_shaders_parse_and_validate() {
        validate(&parse(ShaderStage::Vertex, VERTEX_SHADER_GLSL));
        validate(&parse(ShaderStage::Fragment, FRAGMENT_SHADER_GLSL));
    }

    #[test]
    fn glsl_block_layout_matches_rust_uniforms() {
        let expected = uniform_member_offsets();
        for source in [VERTEX_SHADER_GLSL, FRAGMENT_SHADER_GLSL] {
            let stage = if source == VERTEX_SHADER_GLSL {
                ShaderStage::Vertex
            } else {
                ShaderStage::Fragment
            };
            let offsets = block_offsets(&parse(stage, source));
            assert_eq!(offsets.len(), expected.len());
            for (name, offset) in offsets {
                let want = expected
                    .iter()
                    .find(|(field, _)| *field == name)
                    .map(|(_, offset)| *offset)
                    .unwrap_or_else(|| panic!("unexpected block member {name}"));
                assert_eq!(offset, want, "member {name}");
            }
        }
    }

    #[test]
    fn defaults_use_built_in_sources() {
        let sources = load_sources(None, None).unwrap();
        assert_eq!(sources.vertex.code, VERTEX_SHADER_GLSL);
        assert_eq!(sources.fragment.code, FRAGMENT_SHADER_GLSL);
    }

    #[test]
    fn override_files_replace_a_single_stage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#version 450\nvoid main() {{}}").unwrap();
        let sources = load_sources(None, Some(file.path())).unwrap();
        assert!(sources.fragment.code.contains("void main()"));
        assert_eq!(sources.fragment.label, file.path().display().to_string());
        assert_eq!(sources.vertex.code, VERTEX_SHADER_GLSL);
    }

    #[test]
    fn missing_or_empty_override_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("vertex.glsl");
        let err = load_sources(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ViewerError::ResourceLoad { .. }));

        let empty = dir.path().join("fragment.glsl");
        std::fs::write(&empty, "  \n").unwrap();
        let err = load_sources(None, Some(&empty)).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
