use tiatune::tia::{self, ClockProfile};
use tiatune::{TuningConfig, TuningModel};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let model = TuningModel::new(TuningConfig::default())?;

    for profile in ClockProfile::ALL {
        println!(
            "{}: crystal {} Hz, cpu {:.3} Hz, audio {:.3} Hz, {:.3} fps",
            profile,
            profile.crystal_frequency(),
            profile.cpu_frequency(),
            profile.audio_frequency(),
            profile.frame_rate()
        );

        for control in tia::PITCHED_CONTROLS {
            let low = tia::min_frequency(profile, control);
            let high = tia::max_frequency(profile, control);
            log::debug!("control {} divisor {}", control, tia::DIVISORS[control as usize]);

            println!(
                "  AUDC {:>2}: {:>10.3} Hz (key {:?}) .. {:>10.3} Hz (key {:?})",
                control,
                low,
                model.frequency_to_key_number(low),
                high,
                model.frequency_to_key_number(high)
            );
        }
    }

    Ok(())
}
