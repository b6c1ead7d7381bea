// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Whole-sequence tests against simulated hardware.

mod common;

use std::time::Duration;

use secmon::boot_config::BOOT_CONFIG_SIZE;
use secmon::sim::{SimulatedDevice, SimulatedPlatform, SimulatedWait};
use secmon::sysctr0::offset::{CNTCR, CNTCV0, CNTCV1};
use secmon::{BootConfig, BootConfigStorage, BootSequencer, BootloaderState, ConfigState};

use common::*;

#[test]
fn run_produces_ordered_trace() {
    let memory = new_memory();
    memory.set_word(BOOTLOADER_STATE, BootloaderState::LoadedBootConfig as u32);
    let platform = RecordingPlatform::new(&memory, false, FixedOracle::new(true, true));
    let config = sample_config(Some(0x0000_0001_0000_0002));
    let src = core::ptr::from_ref(&config) as usize;
    let mut storage = BootConfigStorage::new();

    let storage = BootSequencer::new(&platform, &mut storage)
        .unwrap()
        .run(&config);

    let counter = MAP.sysctr0.address();
    let gpu_magic = MAP.gpu_carveout.end() - 0x4;
    let tsec = MAP.gpu_carveout.end() - 0x100;
    assert_eq!(
        platform.recorder.take(),
        vec![
            Op::Clear {
                address: MAP.iram_boot_code_image.address(),
                size: MAP.iram_boot_code_image.size(),
            },
            Op::Read {
                address: BOOTLOADER_STATE
            },
            Op::Flush {
                address: src,
                size: BOOT_CONFIG_SIZE
            },
            Op::Barrier,
            Op::Write {
                address: counter + CNTCV0,
                value: 0x2
            },
            Op::Write {
                address: counter + CNTCV1,
                value: 0x1
            },
            Op::Write {
                address: counter + CNTCR,
                value: 0x3
            },
            Op::Write {
                address: gpu_magic,
                value: 0xc0ed_bbcc
            },
            Op::Write {
                address: tsec,
                value: 0x83
            },
            Op::Write {
                address: tsec + 0x4,
                value: 0x2
            },
            Op::Write {
                address: tsec + 0x8,
                value: 0x210
            },
            Op::Flush {
                address: gpu_magic,
                size: 0x4
            },
            Op::Flush {
                address: tsec,
                size: 0xc
            },
            Op::Barrier,
            Op::Write {
                address: SECMON_STATE,
                value: 1
            },
            Op::Flush {
                address: SECMON_STATE,
                size: 0x4
            },
            Op::Barrier,
        ]
    );
    assert_eq!(storage.state(), ConfigState::Trusted);
    assert_eq!(storage.get(), &config);
}

#[test]
fn production_run_never_reads_source() {
    let memory = new_memory();
    memory.set_word(BOOTLOADER_STATE, BootloaderState::LoadedBootConfig as u32);
    let platform = RecordingPlatform::new(&memory, true, FixedOracle::new(true, true));
    let config = sample_config(Some(0x1234));
    let mut storage = BootConfigStorage::new();

    let storage = BootSequencer::new(&platform, &mut storage)
        .unwrap()
        .run(&config);

    let ops = platform.recorder.take();
    // Only the carveout and the secmon state are flushed.
    let flushes: Vec<_> = ops
        .iter()
        .filter(|op| matches!(op, Op::Flush { .. }))
        .collect();
    assert_eq!(flushes.len(), 3);
    assert!(!ops.contains(&Op::Flush {
        address: core::ptr::from_ref(&config) as usize,
        size: BOOT_CONFIG_SIZE,
    }));

    assert_eq!(storage.state(), ConfigState::Sanitized);
    assert_eq!(storage.get(), &BootConfig::zeroed());
    assert_eq!(platform.verifier.signature_calls.get(), 0);
    assert_eq!(platform.verifier.binding_calls.get(), 0);
    assert_eq!(memory.word(MAP.sysctr0.address() + CNTCV0), 0);
}

#[test]
fn run_waits_for_bootloader_before_loading() {
    let memory = new_memory();
    let mut platform = RecordingPlatform::new(&memory, false, FixedOracle::new(true, true));
    platform.recorder.advance_after = Some((3, BootloaderState::LoadedBootConfig as u32));
    let config = sample_config(None);
    let mut storage = BootConfigStorage::new();

    BootSequencer::new(&platform, &mut storage)
        .unwrap()
        .run(&config);

    let ops = platform.recorder.take();
    let read = Op::Read {
        address: BOOTLOADER_STATE,
    };
    let wait = Op::Wait { us: 1 };
    assert_eq!(&ops[1..8], &[read, wait, read, wait, read, wait, read]);
    assert!(matches!(ops[8], Op::Flush { .. }));
    assert_eq!(memory.word(MAP.sysctr0.address() + CNTCV0), 0);
    assert_eq!(memory.word(MAP.sysctr0.address() + CNTCV1), 0);
}

#[test]
fn bad_binding_leaves_only_unsigned_data() {
    let memory = new_memory();
    memory.set_word(BOOTLOADER_STATE, BootloaderState::Done as u32);
    let platform = RecordingPlatform::new(&memory, false, FixedOracle::new(true, false));
    let config = sample_config(Some(0x55));
    let mut storage = BootConfigStorage::new();

    let storage = BootSequencer::new(&platform, &mut storage)
        .unwrap()
        .run(&config);

    assert_eq!(storage.state(), ConfigState::Sanitized);
    assert!(storage.get().signed_data().is_zero());
    assert_eq!(storage.get().data(), config.data());
    assert_eq!(storage.get().signature(), config.signature());
    // The unsigned TSC seed still applies.
    assert_eq!(memory.word(MAP.sysctr0.address() + CNTCV0), 0x55);
}

#[test]
fn mariko_chip_id_in_carveout() {
    let memory = new_memory();
    memory.set_word(BOOTLOADER_STATE, BootloaderState::LoadedBootConfig as u32);
    let platform = SimulatedPlatform {
        memory: &memory,
        device: SimulatedDevice::new(false, DEVICE_ECID, secmon::hil::device::SocType::Mariko),
        wait: SimulatedWait::new(),
        verifier: FixedOracle::new(false, false),
        map: MAP,
    };
    let mut storage = BootConfigStorage::new();

    BootSequencer::new(&platform, &mut storage)
        .unwrap()
        .run(&sample_config(None));

    assert_eq!(memory.word(MAP.gpu_carveout.end() - 0x100 + 0x8), 0x214);
}

#[test]
fn bootloader_on_another_thread_releases_wait() {
    let memory = new_memory();
    let yield_now = |_: u64| std::thread::yield_now();
    let platform = SimulatedPlatform {
        memory: &memory,
        device: SimulatedDevice::new(false, DEVICE_ECID, secmon::hil::device::SocType::Erista),
        wait: SimulatedWait::with_hook(&yield_now),
        verifier: FixedOracle::new(true, true),
        map: MAP,
    };
    let config = sample_config(Some(7));
    let mut storage = BootConfigStorage::new();

    let state = std::thread::scope(|s| {
        s.spawn(|| {
            std::thread::sleep(Duration::from_millis(20));
            memory.set_word(BOOTLOADER_STATE, BootloaderState::LoadedBootConfig as u32);
        });
        BootSequencer::new(&platform, &mut storage)
            .unwrap()
            .run(&config)
            .state()
    });

    assert_eq!(state, ConfigState::Trusted);
    assert!(platform.wait.elapsed_us() > 0);
    assert_eq!(memory.word(SECMON_STATE), 1);
}
