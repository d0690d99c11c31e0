use glam::Vec3;
use sphere_tracer_lib::{
    camera::{Camera, CameraParams},
    config::RenderSettings,
    hit::{nearest_hit, ray_hit},
    renderer::{render_frame, save_png, Backend, CpuRenderer},
    sampler::JitterMode,
    scene::{Scene, Sphere},
    shader::{ray_color, ShadingMode},
    util::color,
};

const SENTINEL: u32 = 0xFFFF_FFFF;

fn render(scene: &Scene, settings: &RenderSettings) -> Vec<u32> {
    render_frame(
        &mut CpuRenderer::new(),
        scene,
        &CameraParams::default(),
        settings,
    )
    .unwrap()
}

fn single_sphere_scene(width: u32, height: u32) -> Scene {
    Scene::new(width, height).with_sphere(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5))
}

#[test]
fn every_slot_written_once_for_any_group_size() {
    let scene = Scene::demo(37, 23, 5);
    let camera = CameraParams {
        position: Vec3::new(0.0, -1.0, 1.0),
        ..CameraParams::default()
    };
    for workgroup_size in [1, 7, 48, 64, 10_000] {
        let settings = RenderSettings::default().with_workgroup_size(workgroup_size);
        let mut output = vec![SENTINEL; scene.pixel_count() + 5];
        CpuRenderer::new()
            .render(&scene, &camera, &settings, &mut output)
            .unwrap();

        let (image, tail) = output.split_at(scene.pixel_count());
        assert!(image.iter().all(|&word| word != SENTINEL && word >> 24 == 0));
        assert!(tail.iter().all(|&word| word == SENTINEL));
    }
}

#[test]
fn group_size_and_threads_do_not_change_pixels() {
    let scene = Scene::demo(40, 30, 5);
    let camera = CameraParams {
        position: Vec3::new(0.0, -1.0, 1.0),
        ..CameraParams::default()
    };
    let settings = RenderSettings::default();

    let reference = render_frame(&mut CpuRenderer::new(), &scene, &camera, &settings).unwrap();
    for workgroup_size in [1, 13, 48] {
        let settings = settings.with_workgroup_size(workgroup_size);
        let mut single = CpuRenderer::with_threads(1).unwrap();
        let mut several = CpuRenderer::with_threads(4).unwrap();
        assert_eq!(
            render_frame(&mut single, &scene, &camera, &settings).unwrap(),
            reference
        );
        assert_eq!(
            render_frame(&mut several, &scene, &camera, &settings).unwrap(),
            reference
        );
    }
}

#[test]
fn repeated_renders_are_identical() {
    let scene = Scene::demo(64, 48, 5);
    let settings = RenderSettings::default();
    assert_eq!(render(&scene, &settings), render(&scene, &settings));
}

#[test]
fn rays_missing_every_sphere_get_background() {
    // Only sphere sits behind the camera; every ray travels toward -z.
    let scene = Scene::new(16, 9).with_sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0));
    let settings = RenderSettings::default();

    let sum = (0..settings.samples).fold(Vec3::ZERO, |sum, _| sum + settings.background);
    let expected = color::pack(color::resolve(sum, settings.samples));
    assert!(render(&scene, &settings).iter().all(|&word| word == expected));

    let single = settings.with_samples(1);
    assert!(render(&scene, &single).iter().all(|&word| word == 0x0000_CCFE));
}

#[test]
fn center_ray_hits_sphere_from_outside() {
    let camera = Camera::new(&CameraParams::default(), 11, 11);
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
    let hit = ray_hit(&camera.get_ray(0.5, 0.5), &sphere, 0.0, 100.0).unwrap();
    assert!(hit.t > 0.0);
    assert!(hit.front_face);
    assert_eq!(hit.normal, Vec3::Z);

    let settings = RenderSettings::default()
        .with_samples(1)
        .with_jitter(JitterMode::Disabled);
    let pixels = render(&single_sphere_scene(11, 11), &settings);
    assert_eq!(color::unpack(pixels[5 + 5 * 11]), [127, 127, 254]);
}

#[test]
fn single_pixel_rows_and_columns_render_cleanly() {
    let settings = RenderSettings::default()
        .with_samples(1)
        .with_jitter(JitterMode::Disabled);
    let background = color::pack(color::resolve(settings.background, 1));

    for (width, height, center) in [(1, 11, 5), (11, 1, 5), (1, 1, 0)] {
        let pixels = render(&single_sphere_scene(width, height), &settings);
        assert_eq!(pixels.len(), (width * height) as usize);
        assert_eq!(
            color::unpack(pixels[center]),
            [127, 127, 254],
            "{width}x{height}"
        );

        let empty = render(&Scene::new(width, height), &settings);
        assert!(empty.iter().all(|&word| word == background), "{width}x{height}");
    }

    let jittered = RenderSettings::default();
    for (width, height) in [(1, 11), (11, 1), (1, 1)] {
        let pixels = render(&single_sphere_scene(width, height), &jittered);
        assert!(pixels.iter().all(|&word| word != 0), "{width}x{height}");
    }
}

#[test]
fn nearer_sphere_wins_regardless_of_order() {
    let far = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0);
    let near = Sphere::new(Vec3::new(0.3, 0.0, -1.0), 0.5);
    let settings = RenderSettings::default()
        .with_samples(1)
        .with_jitter(JitterMode::Disabled);
    let center = 5 + 5 * 11;

    let ray = Camera::new(&CameraParams::default(), 11, 11).get_ray(0.5, 0.5);
    let near_hit = ray_hit(&ray, &near, 0.0, 100.0).unwrap();
    let expected = color::pack(color::resolve((near_hit.normal.normalize() + 1.0) / 2.0, 1));

    for spheres in [vec![far, near], vec![near, far]] {
        let scene = Scene {
            spheres,
            width: 11,
            height: 11,
        };
        assert_eq!(render(&scene, &settings)[center], expected);
    }

    let far_only = Scene::new(11, 11).with_sphere(far);
    assert_ne!(render(&far_only, &settings)[center], expected);
}

#[test]
fn identical_t_keeps_first_sphere_in_scene_order() {
    let ray = Camera::new(&CameraParams::default(), 11, 11).get_ray(0.5, 0.5);
    let outer = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
    let inner = Sphere::new(Vec3::new(0.0, 0.0, -0.75), 0.25);

    for spheres in [[outer, inner], [inner, outer]] {
        let (index, hit) = nearest_hit(&spheres, &ray, 0.0, 100.0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(hit.t, 0.5);
    }
}

#[test]
fn single_unjittered_sample_is_not_averaged() {
    let scene = Scene::demo(21, 15, 5);
    let params = CameraParams {
        position: Vec3::new(0.0, -1.0, 1.0),
        ..CameraParams::default()
    };
    let settings = RenderSettings::default()
        .with_samples(1)
        .with_jitter(JitterMode::Disabled);
    let pixels = render_frame(&mut CpuRenderer::new(), &scene, &params, &settings).unwrap();

    let camera = Camera::new(&params, scene.width, scene.height);
    for (index, &word) in pixels.iter().enumerate() {
        let x = (index % 21) as f32;
        let y = (index / 21) as f32;
        let ray = camera.get_ray(x / 20.0, y / 14.0);
        let shaded = ray_color(&ray, &scene.spheres, &settings);
        assert_eq!(word, color::pack(color::resolve(shaded, 1)), "pixel {index}");
    }
}

#[test]
fn full_intensity_channel_packs_to_254() {
    let mut settings = RenderSettings::default()
        .with_shading(ShadingMode::HitMask)
        .with_samples(4);
    settings.hit_color = Vec3::new(1.0, 0.5, 0.0);

    let pixels = render(&single_sphere_scene(11, 11), &settings);
    assert_eq!(color::unpack(pixels[5 + 5 * 11]), [254, 127, 0]);
}

#[test]
fn constant_mode_fills_buffer() {
    let settings = RenderSettings::default()
        .with_shading(ShadingMode::Constant)
        .with_samples(1);
    let pixels = render(&Scene::demo(9, 7, 5), &settings);
    assert!(pixels.iter().all(|&word| word == 0x0000_CCFE));
}

#[test]
fn png_output_matches_buffer() {
    let scene = single_sphere_scene(11, 11);
    let settings = RenderSettings::default();
    let pixels = render(&scene, &settings);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    save_png(&path, &pixels, scene.width, scene.height).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (11, 11));
    let [r, g, b] = color::unpack(pixels[0]);
    // Buffer row 0 is the bottom image row.
    assert_eq!(image.get_pixel(0, 10).0, [r, g, b, 255]);
}
