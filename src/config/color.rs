use crate::foundation::core::Rgb8;

/// Resolve a color string, falling back to black when it cannot be parsed.
pub fn resolve_color(input: &str) -> Rgb8 {
    match parse_color(input) {
        Ok(c) => c,
        Err(reason) => {
            tracing::warn!(input, %reason, "unparseable trail color, using black");
            Rgb8::BLACK
        }
    }
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`, `hsl()`/`hsla()` or a basic color name.
///
/// Alpha components are accepted but discarded.
pub fn parse_color(input: &str) -> Result<Rgb8, String> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some((name, args)) = split_functional(&lower) {
        return match name {
            "rgb" | "rgba" => parse_rgb_args(args),
            "hsl" | "hsla" => parse_hsl_args(args),
            other => Err(format!("unknown color function \"{other}\"")),
        };
    }

    named(&lower).ok_or_else(|| format!("unrecognized color \"{s}\""))
}

fn parse_hex(hex: &str) -> Result<Rgb8, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Ok(Rgb8::new(r * 17, g * 17, b * 17))
        }
        6 | 8 => {
            let pair = |i: usize| -> Result<u8, String> {
                Ok(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?)
            };
            Ok(Rgb8::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => Err("hex color must be #rgb, #rgba, #rrggbb or #rrggbbaa".to_owned()),
    }
}

fn split_functional(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim(), inner))
}

/// Accepts comma- or space-separated components with an optional `/ alpha` tail.
fn components(args: &str) -> Vec<&str> {
    let body = args.split('/').next().unwrap_or("");
    body.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_rgb_args(args: &str) -> Result<Rgb8, String> {
    let parts = components(args);
    if parts.len() < 3 {
        return Err(format!("rgb() needs 3 components, got {}", parts.len()));
    }

    let channel = |p: &str| -> Result<u8, String> {
        let v = if let Some(pct) = p.strip_suffix('%') {
            number(pct)? / 100.0 * 255.0
        } else {
            number(p)?
        };
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };

    Ok(Rgb8::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn parse_hsl_args(args: &str) -> Result<Rgb8, String> {
    let parts = components(args);
    if parts.len() < 3 {
        return Err(format!("hsl() needs 3 components, got {}", parts.len()));
    }

    let h = number(parts[0].trim_end_matches("deg"))?;
    let fraction = |p: &str| -> Result<f64, String> {
        let v = number(p.trim_end_matches('%'))?;
        Ok((v / 100.0).clamp(0.0, 1.0))
    };
    Ok(hsl_to_rgb(h, fraction(parts[1])?, fraction(parts[2])?))
}

fn number(p: &str) -> Result<f64, String> {
    let v: f64 = p
        .trim()
        .parse()
        .map_err(|_| format!("invalid color component \"{p}\""))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite color component \"{p}\""))
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb8 {
    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    if s == 0.0 {
        let v = to_u8(l);
        return Rgb8::new(v, v, v);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    Rgb8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn named(name: &str) -> Option<Rgb8> {
    let c = match name {
        "black" => Rgb8::BLACK,
        "white" => Rgb8::WHITE,
        "red" => Rgb8::new(255, 0, 0),
        "lime" => Rgb8::new(0, 255, 0),
        "green" => Rgb8::new(0, 128, 0),
        "blue" => Rgb8::new(0, 0, 255),
        "yellow" => Rgb8::new(255, 255, 0),
        "cyan" | "aqua" => Rgb8::new(0, 255, 255),
        "magenta" | "fuchsia" => Rgb8::new(255, 0, 255),
        "orange" => Rgb8::new(255, 165, 0),
        "purple" => Rgb8::new(128, 0, 128),
        "gray" | "grey" => Rgb8::new(128, 128, 128),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/config/color.rs"]
mod tests;
