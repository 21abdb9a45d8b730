// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loads an image, runs a small scripted sequence of draws into an in-memory target, and writes
//! the result out as a `.ppm`. Exercises the library end to end; not part of its public contract.

use anyhow::{Context, Result};
use clap::Parser;
use raster2d::{BlendMode, Color, PixelFormat, RenderContext, Texture};

#[derive(Parser, Debug)]
#[clap(about = "Draws a source image onto a canvas a few different ways and writes a PPM")]
struct Args {
    /// Input image path (any format the `image` crate can decode).
    input: std::path::PathBuf,

    /// Output PPM path.
    #[clap(short, long, default_value = "out.ppm")]
    output: std::path::PathBuf,

    /// Width of the output canvas.
    #[clap(long, default_value_t = 256)]
    canvas_width: u32,

    /// Height of the output canvas.
    #[clap(long, default_value_t = 256)]
    canvas_height: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let decoded = image::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?.to_rgba8();
    let (src_w, src_h) = (decoded.width(), decoded.height());
    let mut src_bytes = decoded.into_raw();
    let source = Texture::view(src_w, src_h, src_w * 4, PixelFormat::Rgba8888, &mut src_bytes)
        .context("building a texture view over the decoded image")?;

    let mut ctx = RenderContext::new();
    ctx.set_target_texture(Texture::new_owned(args.canvas_width, args.canvas_height, PixelFormat::Rgb24));

    raster2d::clear_target(&mut ctx, Color::rgb(32, 32, 48));
    raster2d::draw_rect(&mut ctx, Color::rgb(200, 200, 200), 4, 4, args.canvas_width.saturating_sub(8), 24);
    ctx.set_blend_mode(BlendMode::Simple);
    raster2d::draw_texture(&mut ctx, &source, 8, 32);
    raster2d::draw_texture_rotated(&mut ctx, &source, 8, 32, 45.0, 0, 0);

    let target = ctx.take_target_texture().expect("just set above");
    write_ppm(&args.output, &target)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn write_ppm(path: &std::path::Path, texture: &Texture<'_>) -> Result<()> {
    use std::io::Write;

    let mut rgb = vec![0u8; texture.width() as usize * texture.height() as usize * 3];
    for y in 0..texture.height() {
        let row = texture.row(y);
        let dst_start = y as usize * texture.width() as usize * 3;
        let dst_end = dst_start + texture.width() as usize * 3;
        raster2d::convert::convert_pixels(texture.format(), PixelFormat::Rgb24, row, &mut rgb[dst_start..dst_end], texture.width() as usize);
    }

    let mut file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "P6\n{} {}\n255", texture.width(), texture.height())?;
    file.write_all(&rgb)?;
    Ok(())
}
