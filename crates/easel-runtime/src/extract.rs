//! Result extraction: reading guest-mutated state back into a [`Snapshot`].

use easel_types::{Canvas, Color, SandboxError, Snapshot, HEIGHT, WIDTH};
use mlua::{Lua, Table, Value};

/// Copy `title`, `content` and every `image` cell out of the environment.
///
/// Cells are read with `x` outer and `y` inner, so the flat canvas holds
/// cell `(x, y)` at `x * HEIGHT + y`. Only a non-table `image` or column and
/// non-text `title`/`content` are malformed; odd cell values are not.
pub(crate) fn snapshot(lua: &Lua, env: &Table) -> Result<Snapshot, SandboxError> {
    let title = read_text(lua, env, "title")?;
    let content = read_text(lua, env, "content")?;
    let canvas = read_canvas(lua, env)?;
    Ok(Snapshot::new(title, content, canvas))
}

fn malformed(msg: String) -> SandboxError {
    SandboxError::MalformedResult(msg)
}

fn host(err: mlua::Error) -> SandboxError {
    SandboxError::MalformedResult(err.to_string())
}

/// Strings are taken as-is and numbers use Lua's own formatting.
fn read_text(lua: &Lua, env: &Table, name: &str) -> Result<String, SandboxError> {
    let value: Value = env.raw_get(name).map_err(host)?;
    let type_name = value.type_name();
    if !matches!(value, Value::String(_) | Value::Integer(_) | Value::Number(_)) {
        return Err(malformed(format!("{name} must be a string, got {type_name}")));
    }
    match lua.coerce_string(value).map_err(host)? {
        Some(text) => Ok(String::from(text.to_string_lossy())),
        None => Err(malformed(format!("{name} must be a string, got {type_name}"))),
    }
}

fn read_canvas(lua: &Lua, env: &Table) -> Result<Canvas, SandboxError> {
    let image: Value = env.raw_get("image").map_err(host)?;
    let image = match image {
        Value::Table(image) => image,
        other => {
            return Err(malformed(format!(
                "image must be a table, got {}",
                other.type_name()
            )))
        }
    };

    let mut pixels = Vec::with_capacity(WIDTH * HEIGHT);
    for x in 0..WIDTH {
        let column: Value = image.raw_get(x as i64).map_err(host)?;
        let column = match column {
            Value::Table(column) => column,
            other => {
                return Err(malformed(format!(
                    "image[{x}] must be a table, got {}",
                    other.type_name()
                )))
            }
        };
        for y in 0..HEIGHT {
            let cell: Value = column.raw_get(y as i64).map_err(host)?;
            pixels.push(read_cell(lua, cell)?);
        }
    }

    Canvas::from_pixels(WIDTH, HEIGHT, pixels)
        .ok_or_else(|| malformed("canvas size mismatch".to_string()))
}

/// Integers, integral floats and numeric strings, masked to 24 bits.
///
/// Anything Lua cannot convert to an integer (nil, fractions, booleans,
/// non-numeric strings) reads as black.
fn read_cell(lua: &Lua, cell: Value) -> Result<Color, SandboxError> {
    let packed = lua.coerce_integer(cell).map_err(host)?.unwrap_or(0);
    Ok(Color::from_packed(packed))
}
