/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! driver for the GM1356 USB sound level meter, accessed through its Linux hidraw device
//! (e.g. `/dev/hidraw0`). The meter uses 8 byte HID reports without report ids: we send a
//! command byte (plus data) and read back an 8 byte state report whose first two bytes are
//! the level in 1/10 dB

use std::{fs::{File, OpenOptions}, io::{self, Read, Write}, path::Path, thread, time::Duration};
use tracing::debug;

use crate::errors::{Result, device_error, fatal_device_error};
use super::SoundLevelDevice;

pub const MODEL: &str = "gm1356";

pub const PACKET_SIZE: usize = 8;

pub const CMD_CONFIGURE: u8 = 0x56;
pub const CMD_STATE_REQUEST: u8 = 0xB3;

pub const FILTER_DBA: u8 = 0;
pub const FILTER_DBC: u8 = 1;

pub const CURRENT_MEASUREMENT: u8 = 0;
pub const MAX_MEASUREMENT: u8 = 1;

pub const SPEED_SLOW: u8 = 0;
pub const SPEED_FAST: u8 = 1;

const RESPONSE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
#[repr(u8)]
pub enum MeasureRange {
    R30_130 = 0,
    R30_80 = 1,
    R50_100 = 2,
    R60_110 = 3,
    R80_130 = 4,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Gm1356Config {
    pub range: MeasureRange,
    pub filter: u8,
    pub mode: u8,
    pub speed: u8,
}

impl Default for Gm1356Config {
    fn default()->Self {
        Gm1356Config { range: MeasureRange::R30_130, filter: FILTER_DBA, mode: CURRENT_MEASUREMENT, speed: SPEED_FAST }
    }
}

impl Gm1356Config {
    /// the data byte of the configure command
    pub fn settings_byte (&self)->u8 {
        (self.range as u8) | (self.filter << 4) | (self.mode << 5) | (self.speed << 6)
    }
}

/// level in dB from a state report
pub fn decode_level (report: &[u8])->Option<f64> {
    if report.len() >= 2 {
        Some( (report[0] as u16 * 256 + report[1] as u16) as f64 / 10.0 )
    } else {
        None
    }
}

pub struct Gm1356<T=File> {
    io: T,
    response_delay: Duration,
}

impl Gm1356<File> {
    /// open the hidraw device at `path` and configure the meter with default settings
    pub fn connect (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let mut opts = OpenOptions::new();
        opts.read(true).write(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.custom_flags( libc::O_NONBLOCK);
        }

        let file = opts.open( path)
            .map_err( |e| fatal_device_error!("could not find GM1356 sound measurement device at {:?}: {}", path, e))?;

        Gm1356::with_transport( file, Gm1356Config::default(), RESPONSE_DELAY)
    }
}

impl<T> Gm1356<T> where T: Read + Write {
    pub fn with_transport (io: T, config: Gm1356Config, response_delay: Duration)->Result<Self> {
        let mut dev = Gm1356 { io, response_delay };
        dev.configure( &config).map_err( |e| fatal_device_error!("failed to configure GM1356: {}", e))?;
        Ok(dev)
    }

    pub fn transport (&self)->&T { &self.io }

    fn configure (&mut self, config: &Gm1356Config)->io::Result<()> {
        self.send( &[CMD_CONFIGURE, config.settings_byte()])?;
        thread::sleep( self.response_delay);

        // the meter acknowledges with a report we don't need
        let mut buf = [0u8; PACKET_SIZE];
        match self.io.read( &mut buf) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(()),
            Err(e) => Err(e)
        }
    }

    /// hidraw output reports start with the report number, which is 0 for unnumbered reports
    fn send (&mut self, cmd: &[u8])->io::Result<()> {
        let mut report = [0u8; PACKET_SIZE+1];
        let len = cmd.len().min(PACKET_SIZE);
        report[1..1+len].copy_from_slice( &cmd[..len]);
        self.io.write_all( &report)?;
        self.io.flush()
    }
}

impl<T> SoundLevelDevice for Gm1356<T> where T: Read + Write {
    fn read_level (&mut self)->Result<f64> {
        self.send( &[CMD_STATE_REQUEST]).map_err( |e| device_error!("failed to request GM1356 state: {}", e))?;
        thread::sleep( self.response_delay);

        let mut buf = [0u8; PACKET_SIZE];
        let n = self.io.read( &mut buf).map_err( |e| device_error!("failed to read GM1356 state: {}", e))?;
        debug!("GM1356 report: {:02x?}", &buf[..n]);

        decode_level( &buf[..n]).ok_or_else( || device_error!("short GM1356 report ({} bytes)", n))
    }

    fn model (&self)->&str { MODEL }
}
