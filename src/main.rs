use std::error::Error;
use log::info;
use pixels::{SurfaceTexture, Pixels};
use winit::event::Event;
use winit::{event_loop::EventLoop, window::WindowBuilder, dpi::PhysicalSize};
use a2_ntsc::{DisplayMode, Framebuffer, NtscConfig, NtscFilter};

/// Usage: a2-ntsc <image> [double hi-res: true|false] [output.png]
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("usage: a2-ntsc <image> [true|false] [output.png]")?;
    let mode = match args.next() {
        Some(flag) => DisplayMode::from(flag.parse::<bool>()?),
        None => DisplayMode::DoubleHiRes,
    };
    let output_path = args.next();

    // Load image and convert to an rgb8 framebuffer.
    info!("loading {}", input);
    let img = image::open(&input)?.into_rgb8();
    let (width, height) = img.dimensions();
    let framebuffer = Framebuffer::from_raw(width as usize, height as usize, img.into_raw())?;

    // Run the composite round trip once; the result never changes so there's nothing to animate.
    let filter = NtscFilter::new(NtscConfig::default())?;
    let output = filter.process(&framebuffer, mode)?;

    if let Some(path) = output_path {
        image::RgbImage::from_raw(width, height, output.as_raw().to_vec())
            .ok_or("output framebuffer has the wrong size")?
            .save(&path)?;
        info!("wrote {}", path);
    }

    // Create event loop.
    let event_loop = EventLoop::new();

    // Create window, at twice the framebuffer size.
    let window = {
        let size = PhysicalSize::new(width * 2, height * 2);

        WindowBuilder::new()
            .with_title(format!("NTSC - {}", input))
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    };
    window.set_resizable(false);

    // Create pixel buffer.
    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture)?
    };

    event_loop.run(move |event, _, _| {
        match event {
            Event::RedrawRequested(_) => {
                let frame = pixels.get_frame_mut();
                for (pixel, rgb) in frame.chunks_exact_mut(4).zip(output.as_raw().chunks_exact(3)) {
                    pixel[..3].copy_from_slice(rgb);
                    pixel[3] = 0xFF;
                }
                if let Err(err) = pixels.render() {
                    log::error!("failed to render pixel buffer to screen: {}", err);
                }
            },
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            _ => {}
        }
    });
}
