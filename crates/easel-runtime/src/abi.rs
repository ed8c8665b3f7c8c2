//! The sandbox ABI: the complete set of names a guest script can see.
//!
//! | name            | value                                   |
//! |-----------------|-----------------------------------------|
//! | `title`         | string, guest read/write                |
//! | `content`       | string, guest read/write                |
//! | `width`         | 64, informational                       |
//! | `height`        | 36, informational                       |
//! | `image`         | `image[x][y]`, x in 0..64, y in 0..36   |
//! | `rgb(r, g, b)`  | packed color                            |
//! | `hsl(h, s, l)`  | packed color                            |
//!
//! The guest chunk runs with this table as its `_ENV`, so nothing from the
//! interpreter's own globals (`load`, `pcall`, `require`, ...) is reachable.
//!
//! `width` and `height` are plain globals the guest can overwrite. The
//! extractor always reads the fixed 64x36 grid, so reassigning them only
//! changes what the guest itself sees.

use easel_color::{check_arity, ColorArg, ColorError};
use easel_types::{Color, HEIGHT, WIDTH};
use mlua::{Lua, MultiValue, Table, Value};

use crate::SessionConfig;

/// Names installed into every guest environment.
pub const GLOBALS: [&str; 7] = ["title", "content", "width", "height", "image", "rgb", "hsl"];

type Builtin = fn(&[ColorArg]) -> Result<Color, ColorError>;

/// Build a fresh guest environment table.
pub(crate) fn install(lua: &Lua, config: &SessionConfig) -> mlua::Result<Table> {
    let env = lua.create_table()?;
    env.raw_set("title", config.title.as_str())?;
    env.raw_set("content", config.content.as_str())?;
    env.raw_set("width", WIDTH as i64)?;
    env.raw_set("height", HEIGHT as i64)?;
    env.raw_set("image", blank_image(lua)?)?;
    env.raw_set("rgb", color_function(lua, "rgb", easel_color::rgb)?)?;
    env.raw_set("hsl", color_function(lua, "hsl", easel_color::hsl)?)?;
    Ok(env)
}

/// `WIDTH` column tables keyed from 0, each with `HEIGHT` zero cells keyed from 0.
fn blank_image(lua: &Lua) -> mlua::Result<Table> {
    let image = lua.create_table()?;
    for x in 0..WIDTH {
        let column = lua.create_table()?;
        for y in 0..HEIGHT {
            column.raw_set(y as i64, 0)?;
        }
        image.raw_set(x as i64, column)?;
    }
    Ok(image)
}

fn color_function(lua: &Lua, name: &'static str, builtin: Builtin) -> mlua::Result<mlua::Function> {
    lua.create_function(move |_, args: MultiValue| {
        let color = call_builtin(name, builtin, &args).map_err(mlua::Error::external)?;
        Ok(i64::from(color.packed()))
    })
}

fn call_builtin(name: &'static str, builtin: Builtin, args: &MultiValue) -> Result<Color, ColorError> {
    check_arity(name, args.len())?;
    let args = args
        .iter()
        .enumerate()
        .map(|(i, value)| color_arg(name, i + 1, value))
        .collect::<Result<Vec<_>, _>>()?;
    builtin(&args)
}

/// Tag a guest value as integer or real. Strings and other types are rejected.
fn color_arg(function: &'static str, position: usize, value: &Value) -> Result<ColorArg, ColorError> {
    match value {
        Value::Integer(v) => Ok(ColorArg::Integer(*v)),
        Value::Number(v) => Ok(ColorArg::Real(*v)),
        other => Err(ColorError::NotANumber {
            function,
            position,
            found: other.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> (Lua, Table) {
        let lua = Lua::new();
        let env = install(&lua, &SessionConfig::default()).unwrap();
        (lua, env)
    }

    #[test]
    fn installs_exactly_the_abi() {
        let (_lua, env) = env();
        let mut names: Vec<String> = env
            .pairs::<String, Value>()
            .map(|pair| pair.unwrap().0)
            .collect();
        names.sort();
        let mut expected: Vec<String> = GLOBALS.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn image_is_zero_indexed() {
        let (_lua, env) = env();
        let image: Table = env.raw_get("image").unwrap();
        let first: Table = image.raw_get(0).unwrap();
        let last: Table = image.raw_get(WIDTH as i64 - 1).unwrap();
        let cell: i64 = first.raw_get(0).unwrap();
        assert_eq!(cell, 0);
        let cell: i64 = last.raw_get(HEIGHT as i64 - 1).unwrap();
        assert_eq!(cell, 0);
        let missing: Value = image.raw_get(WIDTH as i64).unwrap();
        assert!(missing.is_nil());
    }

    #[test]
    fn builtins_distinguish_integers_from_reals() {
        let (_lua, env) = env();
        let rgb: mlua::Function = env.raw_get("rgb").unwrap();
        let ints: i64 = rgb.call((255, 0, 128)).unwrap();
        let reals: i64 = rgb.call((1.0, 0.0, 0.5)).unwrap();
        assert_eq!(ints, 0xff0080);
        assert_eq!(reals, 0xff0080);
    }

    #[test]
    fn builtins_reject_strings() {
        let (_lua, env) = env();
        let hsl: mlua::Function = env.raw_get("hsl").unwrap();
        let result: mlua::Result<i64> = hsl.call(("0", 100, 50));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("number expected, got string"));
    }
}
