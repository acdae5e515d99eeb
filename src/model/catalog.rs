//! Fixed description of the system on display: which bodies exist, how they
//! move, what they look like and what the info panel says about them.
//!
//! Distances and speeds are picked for a readable view, not to scale.

use super::body::{BodyID, BodyParams, FocusClass};
use super::info::InfoRecord;
use super::scene::RingParams;

// IDs are handed out in build order, see `SolarSystem::build`
pub const SUN: BodyID = BodyID(0);
pub const MERCURY: BodyID = BodyID(1);
pub const VENUS: BodyID = BodyID(2);
pub const EARTH: BodyID = BodyID(3);
pub const MARS: BodyID = BodyID(4);
pub const JUPITER: BodyID = BodyID(5);
pub const SATURN: BodyID = BodyID(6);
pub const URANUS: BodyID = BodyID(7);
pub const NEPTUNE: BodyID = BodyID(8);
pub const MOON: BodyID = BodyID(9);
pub const BODY_COUNT: usize = 10;

/// The eight bodies that revolve through their own orbit container.
pub const PLANETS: [BodyID; 8] = [
    MERCURY, VENUS, EARTH, MARS, JUPITER, SATURN, URANUS, NEPTUNE,
];

pub const SUN_GLOW_RADIUS: f32 = 1.1;
/// Sun tint, standing in for its orange emission
pub const SUN_COLOR: (f32, f32, f32) = (1.0, 0.8, 0.55);
pub const GLOW_COLOR: (f32, f32, f32) = (1.0, 0.47, 0.0);

/// Where the moon hangs off the earth before its first update.
pub const MOON_OFFSET: [f32; 3] = [0.5, 0.0, 0.0];

pub struct BodySpec {
    pub id: BodyID,
    pub radius: f32,
    pub texture: &'static str,
    pub distance: f32,
    pub rotation_speed: f64,
    pub orbit_speed: f64,
    pub focus_class: FocusClass,
    pub info: InfoRecord,
}

impl BodySpec {
    pub fn params(&self) -> BodyParams {
        BodyParams {
            radius: self.radius,
            texture: String::from(self.texture),
            distance_from_parent: self.distance,
            rotation_speed: self.rotation_speed,
            orbit_speed: self.orbit_speed,
        }
    }
}

pub struct RingSpec {
    pub owner: BodyID,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub tilt: f32,
    pub texture: &'static str,
}

impl RingSpec {
    pub fn params(&self) -> RingParams {
        RingParams {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            tilt: self.tilt,
            texture: String::from(self.texture),
        }
    }
}

pub static RINGS: [RingSpec; 2] = [
    RingSpec {
        owner: SATURN,
        inner_radius: 0.55,
        outer_radius: 0.75,
        tilt: 0.3,
        texture: "textures/planets/rings_saturn_baseColor.png",
    },
    RingSpec {
        owner: URANUS,
        inner_radius: 0.4,
        outer_radius: 0.45,
        tilt: 0.8,
        texture: "textures/planets/rings_uranus-2_baseColor.png",
    },
];

/// Every body, in ID order.
pub static BODIES: [BodySpec; BODY_COUNT] = [
    BodySpec {
        id: SUN,
        radius: 1.0,
        texture: "textures/planets/Sun-map_baseColor.jpg",
        distance: 0.0,
        rotation_speed: 0.001,
        orbit_speed: 0.0,
        focus_class: FocusClass::Star,
        info: InfoRecord {
            name: "Sol",
            diameter: "1.392.700 km",
            description: "El Sol es la estrella central del Sistema Solar. Es una esfera casi perfecta de plasma caliente, con movimientos de convección interna que generan un campo magnético a través de un proceso de dinamo. Es, con diferencia, la fuente de energía más importante para la vida en la Tierra.",
            distance_from_sun: "0 km (es el centro)",
            orbital_period: "N/A",
            rotation_period: "25-35 días (varía según la latitud)",
            temperature: "5.500°C (superficie), 15.000.000°C (núcleo)",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: MERCURY,
        radius: 0.08,
        texture: "textures/planets/Mercury-map_baseColor.jpeg",
        distance: 1.8,
        rotation_speed: 0.004,
        orbit_speed: 0.008,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Mercurio",
            diameter: "4.879 km",
            description: "Mercurio es el planeta más pequeño y más interno del Sistema Solar. Su órbita alrededor del Sol tarda 87,97 días terrestres, el más breve de todos los planetas. Su superficie está llena de cráteres de impacto, similar a la Luna terrestre.",
            distance_from_sun: "57.9 millones km",
            orbital_period: "88 días",
            rotation_period: "59 días",
            temperature: "-173°C a 427°C",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: VENUS,
        radius: 0.2,
        texture: "textures/planets/venus_baseColor.jpeg",
        distance: 2.5,
        rotation_speed: 0.002,
        orbit_speed: 0.006,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Venus",
            diameter: "12.104 km",
            description: "Venus es el segundo planeta del Sistema Solar. Es un planeta terrestre similar a la Tierra en tamaño y masa, pero sus condiciones superficiales son extremas debido a una atmósfera densa de dióxido de carbono que genera un intenso efecto invernadero.",
            distance_from_sun: "108.2 millones km",
            orbital_period: "225 días",
            rotation_period: "243 días (retrógrado)",
            temperature: "462°C (promedio)",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: EARTH,
        radius: 0.22,
        texture: "textures/planets/Earth-map_baseColor.jpeg",
        distance: 3.5,
        rotation_speed: 0.003,
        orbit_speed: 0.004,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Tierra",
            diameter: "12.742 km",
            description: "La Tierra es el tercer planeta del Sistema Solar y el único conocido que alberga vida. Tiene una atmósfera rica en nitrógeno y oxígeno, y es el único planeta con agua líquida en su superficie, cubriendo el 71% de la misma.",
            distance_from_sun: "149.6 millones km",
            orbital_period: "365.25 días",
            rotation_period: "24 horas",
            temperature: "-88°C a 58°C",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: MARS,
        radius: 0.15,
        texture: "textures/planets/Mars-map_baseColor.jpeg",
        distance: 4.5,
        rotation_speed: 0.0025,
        orbit_speed: 0.003,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Marte",
            diameter: "6.779 km",
            description: "Marte es el cuarto planeta del Sistema Solar. Conocido como el 'planeta rojo' debido a la abundancia de óxido de hierro en su superficie, tiene dos pequeñas lunas, una atmósfera tenue y es objetivo de numerosas misiones de exploración espacial.",
            distance_from_sun: "227.9 millones km",
            orbital_period: "687 días",
            rotation_period: "24 horas y 37 minutos",
            temperature: "-153°C a 20°C",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: JUPITER,
        radius: 0.5,
        texture: "textures/planets/Jupiter-map_baseColor.jpeg",
        distance: 6.0,
        rotation_speed: 0.004,
        orbit_speed: 0.002,
        focus_class: FocusClass::GasGiant,
        info: InfoRecord {
            name: "Júpiter",
            diameter: "139.820 km",
            description: "Júpiter es el planeta más grande del Sistema Solar. Es un gigante gaseoso compuesto principalmente de hidrógeno y helio, con una característica Gran Mancha Roja, una tormenta anticiclónica masiva que ha existido durante siglos.",
            distance_from_sun: "778.5 millones km",
            orbital_period: "11.86 años",
            rotation_period: "9 horas y 56 minutos",
            temperature: "-145°C (nubes superiores)",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: SATURN,
        radius: 0.4,
        texture: "textures/planets/Saturn-map_baseColor.jpeg",
        distance: 8.0,
        rotation_speed: 0.0038,
        orbit_speed: 0.0015,
        focus_class: FocusClass::GasGiant,
        info: InfoRecord {
            name: "Saturno",
            diameter: "116.460 km",
            description: "Saturno es el sexto planeta del Sistema Solar y es famoso por su impresionante sistema de anillos, compuestos principalmente de partículas de hielo y roca. Es un gigante gaseoso similar a Júpiter pero menos masivo.",
            distance_from_sun: "1.434 millones km",
            orbital_period: "29.46 años",
            rotation_period: "10 horas y 33 minutos",
            temperature: "-178°C (nubes superiores)",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: URANUS,
        radius: 0.3,
        texture: "textures/planets/Uranus-map_baseColor.jpeg",
        distance: 9.5,
        rotation_speed: 0.003,
        orbit_speed: 0.001,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Urano",
            diameter: "50.724 km",
            description: "Urano es el séptimo planeta del Sistema Solar. Es un gigante de hielo con una composición similar a Neptuno. Tiene la característica única de rotar sobre un eje casi paralelo a su órbita, como si rodara por su trayectoria.",
            distance_from_sun: "2.871 millones km",
            orbital_period: "84.01 años",
            rotation_period: "17 horas y 14 minutos (retrógrado)",
            temperature: "-224°C",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: NEPTUNE,
        radius: 0.28,
        texture: "textures/planets/Neptune-map_baseColor.jpeg",
        distance: 11.0,
        rotation_speed: 0.0032,
        orbit_speed: 0.0008,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Neptuno",
            diameter: "49.244 km",
            description: "Neptuno es el octavo y más distante planeta del Sistema Solar. Es un gigante de hielo similar a Urano, con una atmósfera dinámica caracterizada por sus tormentas y vientos supersónicos, siendo la Gran Mancha Oscura su característica más notable.",
            distance_from_sun: "4.495 millones km",
            orbital_period: "164.8 años",
            rotation_period: "16 horas y 6 minutos",
            temperature: "-218°C",
            distance_from_earth: None,
        },
    },
    BodySpec {
        id: MOON,
        radius: 0.06,
        texture: "textures/planets/Moon-map_baseColor.jpeg",
        distance: 0.5,
        rotation_speed: 0.002,
        // radians per second of wall-clock time, see `update::advance_moon`
        orbit_speed: 0.02,
        focus_class: FocusClass::Small,
        info: InfoRecord {
            name: "Luna",
            diameter: "3.474 km",
            description: "La Luna es el único satélite natural de la Tierra. Es el quinto satélite más grande del Sistema Solar y el más grande en proporción a su planeta. Su influencia gravitatoria produce las mareas oceánicas y una ligera ralentización de la rotación de la Tierra.",
            distance_from_sun: "149.6 millones km (igual que la Tierra)",
            orbital_period: "27.3 días (alrededor de la Tierra)",
            rotation_period: "27.3 días (rotación síncrona)",
            temperature: "-173°C a 127°C",
            distance_from_earth: Some("384.400 km"),
        },
    },
];

pub fn spec(id: BodyID) -> &'static BodySpec {
    &BODIES[id.0]
}
