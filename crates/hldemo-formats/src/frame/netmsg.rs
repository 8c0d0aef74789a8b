//! Network message frames
//!
//! Any frame whose tag is not one of the named kinds carries a snapshot of
//! the client's render and movement state followed by the raw network
//! message received that frame.
//!
//! ```text
//! DemoInfo      436 bytes
//!   f32         timestamp
//!   RefParams   232 bytes
//!   UserCmd      52 bytes
//!   MoveVars    132 bytes
//!   [f32; 3]    view
//!   i32         viewmodel
//! NetSequences   28 bytes
//! i32           message length (0..=65536)
//! [u8]          message
//! ```

use crate::constants::FRAME_NETMSG_SKYNAME_SIZE;
use crate::fixed_string::FixedString;
use binrw::{BinRead, BinWrite};

/// Network message frame contents
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetMsg {
    /// Tag byte the frame was recorded with (never 2..=9, writing such a
    /// tag fails)
    pub tag: u8,
    /// Client state snapshot
    pub info: DemoInfo,
    /// Netchan sequence counters
    pub sequences: NetSequences,
    /// Opaque network message bytes
    pub msg: Vec<u8>,
}

/// Client state snapshot stored with every network message (436 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct DemoInfo {
    /// Client time of the snapshot
    pub timestamp: f32,
    /// Render parameters
    pub ref_params: RefParams,
    /// User command sent that frame
    pub user_cmd: UserCmd,
    /// Movement variables
    pub move_vars: MoveVars,
    /// View vector
    pub view: [f32; 3],
    /// View model index
    pub viewmodel: i32,
}

/// Render parameters (232 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
#[allow(missing_docs)] // engine field names
pub struct RefParams {
    /// View origin
    pub vieworg: [f32; 3],
    /// View angles (pitch, yaw, roll)
    pub viewangles: [f32; 3],
    /// Forward vector
    pub forward: [f32; 3],
    /// Right vector
    pub right: [f32; 3],
    /// Up vector
    pub up: [f32; 3],
    /// Duration of the rendered frame in seconds
    pub frametime: f32,
    /// Client time
    pub time: f32,
    pub intermission: i32,
    pub paused: i32,
    pub spectator: i32,
    pub onground: i32,
    pub waterlevel: i32,
    /// Simulated origin
    pub simorg: [f32; 3],
    /// Simulated velocity
    pub simvel: [f32; 3],
    pub viewheight: [f32; 3],
    pub idealpitch: f32,
    /// Client-side view angles
    pub cl_viewangles: [f32; 3],
    pub health: i32,
    pub crosshairangle: [f32; 3],
    pub viewsize: f32,
    pub punchangle: [f32; 3],
    pub maxclients: i32,
    pub viewentity: i32,
    pub playernum: i32,
    pub max_entities: i32,
    pub demoplayback: i32,
    pub hardware: i32,
    pub smoothing: i32,
    /// Recorded pointer value, meaningless outside the recording process
    pub ptr_cmd: i32,
    /// Recorded pointer value, meaningless outside the recording process
    pub ptr_movevars: i32,
    pub viewport: [i32; 4],
    pub next_view: i32,
    pub only_client_draw: i32,
}

/// User command (52 bytes, alignment bytes kept verbatim)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
#[allow(missing_docs)] // engine field names
pub struct UserCmd {
    /// Interpolation time in milliseconds
    pub lerp_msec: i16,
    /// Command duration in milliseconds
    pub msec: i8,
    pub align_1: u8,
    /// Command view angles
    pub viewangles: [f32; 3],
    pub forwardmove: f32,
    pub sidemove: f32,
    pub upmove: f32,
    pub lightlevel: i8,
    pub align_2: u8,
    /// Button bitmask
    pub buttons: u16,
    pub impulse: i8,
    pub weaponselect: i8,
    pub align_3: u8,
    pub align_4: u8,
    pub impact_index: i32,
    pub impact_position: [f32; 3],
}

/// Movement variables (132 bytes)
#[derive(Debug, Clone, PartialEq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
#[allow(missing_docs)] // engine field names
pub struct MoveVars {
    pub gravity: f32,
    pub stopspeed: f32,
    pub maxspeed: f32,
    pub spectatormaxspeed: f32,
    pub accelerate: f32,
    pub airaccelerate: f32,
    pub wateraccelerate: f32,
    pub friction: f32,
    pub edgefriction: f32,
    pub waterfriction: f32,
    pub entgravity: f32,
    pub bounce: f32,
    pub stepsize: f32,
    pub maxvelocity: f32,
    pub zmax: f32,
    pub wave_height: f32,
    pub footsteps: i32,
    /// Sky texture name
    pub sky_name: FixedString<FRAME_NETMSG_SKYNAME_SIZE>,
    pub rollangle: f32,
    pub rollspeed: f32,
    pub skycolor_r: f32,
    pub skycolor_g: f32,
    pub skycolor_b: f32,
    pub skyvec_x: f32,
    pub skyvec_y: f32,
    pub skyvec_z: f32,
}

/// Netchan sequence counters (28 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
#[allow(missing_docs)] // engine field names
pub struct NetSequences {
    pub incoming_sequence: i32,
    pub incoming_acknowledged: i32,
    pub incoming_reliable_acknowledged: i32,
    pub incoming_reliable_sequence: i32,
    pub outgoing_sequence: i32,
    pub reliable_sequence: i32,
    pub last_reliable_sequence: i32,
}

impl NetMsg {
    /// Overwrite the yaw component of every recorded view angle
    pub fn set_yaw(&mut self, yaw: f32) {
        self.info.ref_params.viewangles[1] = yaw;
        self.info.ref_params.cl_viewangles[1] = yaw;
        self.info.user_cmd.viewangles[1] = yaw;
    }
}
