mod tests {
    use faba_ambiance::command::{Command, EffectColorSlot, FRAME_LEN};
    use faba_ambiance::{CommandReceiver, DisplayMode, ReceiverState, rgbw};
    use heapless::Vec;

    const PANELS: usize = 5;

    fn feed_all(receiver: &mut CommandReceiver<PANELS>, bytes: &[u8]) -> Vec<Command, 8> {
        let mut commands = Vec::new();
        for &byte in bytes {
            if let Some(command) = receiver.feed(byte) {
                commands.push(command).unwrap();
            }
        }
        commands
    }

    #[test]
    fn test_panel_frame() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        let commands = feed_all(&mut receiver, &[0x82, 0x0A, 0x14, 0x1E, 0x28, 0x00]);

        assert_eq!(
            commands.as_slice(),
            &[Command::SetPanelColor {
                panel: 2,
                color: rgbw(10, 20, 30, 40),
            }]
        );
        assert_eq!(receiver.state(), ReceiverState::Idle);
    }

    #[test]
    fn test_msb_nibble_restores_full_channels() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        let commands = feed_all(&mut receiver, &[0x80, 0x7F, 0x00, 0x01, 0x02, 0x0F]);

        assert_eq!(
            commands.as_slice(),
            &[Command::SetPanelColor {
                panel: 0,
                color: rgbw(255, 128, 129, 130),
            }]
        );
    }

    #[test]
    fn test_encode_matches_decoder() {
        let command = Command::SetEffectColor {
            slot: EffectColorSlot::RampEnd,
            color: rgbw(200, 7, 128, 255),
        };
        let frame = command.encode();
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame[0], 0x80 | 102);
        assert_eq!(frame[5], 0b1101);

        let mut receiver = CommandReceiver::<PANELS>::new();
        assert_eq!(feed_all(&mut receiver, &frame).as_slice(), &[command]);
    }

    #[test]
    fn test_payload_bytes_ignored_while_idle() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        assert!(feed_all(&mut receiver, &[0x00, 0x7F, 0x12]).is_empty());
        assert_eq!(receiver.state(), ReceiverState::Idle);
    }

    #[test]
    fn test_address_byte_restarts_frame() {
        let mut receiver = CommandReceiver::<PANELS>::new();

        // Frame for panel 1 loses its last bytes, panel 3 follows.
        let commands = feed_all(
            &mut receiver,
            &[0x81, 0x01, 0x02, 0x83, 0x05, 0x06, 0x07, 0x08, 0x00],
        );

        assert_eq!(
            commands.as_slice(),
            &[Command::SetPanelColor {
                panel: 3,
                color: rgbw(5, 6, 7, 8),
            }]
        );
    }

    #[test]
    fn test_restart_in_every_state() {
        for received in 0..5 {
            let mut receiver = CommandReceiver::<PANELS>::new();
            receiver.feed(0x80);
            for _ in 0..received {
                receiver.feed(0x11);
            }
            assert_eq!(receiver.feed(0x84), None);
            assert_eq!(
                receiver.state(),
                ReceiverState::AddressReceived { address: 4 }
            );
        }
    }

    #[test]
    fn test_malformed_msb_byte_returns_to_idle() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        let commands = feed_all(&mut receiver, &[0x81, 0x01, 0x02, 0x03, 0x04, 0x10]);

        assert!(commands.is_empty());
        assert_eq!(receiver.state(), ReceiverState::Idle);
    }

    #[test]
    fn test_effect_color_routing() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        let commands = feed_all(&mut receiver, &[0xE5, 0x01, 0x02, 0x03, 0x04, 0x00]);

        assert_eq!(
            commands.as_slice(),
            &[Command::SetEffectColor {
                slot: EffectColorSlot::RampStart,
                color: rgbw(1, 2, 3, 4),
            }]
        );
    }

    #[test]
    fn test_mode_routing_ignores_payload() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        let commands = feed_all(
            &mut receiver,
            &[
                0x80 | 122, 0x7F, 0x7F, 0x7F, 0x7F, 0x0F, // single color
                0x80 | 124, 0x00, 0x00, 0x00, 0x00, 0x00, // gradient
            ],
        );

        assert_eq!(
            commands.as_slice(),
            &[
                Command::SelectMode(DisplayMode::SingleColor),
                Command::SelectMode(DisplayMode::TwoColorGradient),
            ]
        );
    }

    #[test]
    fn test_unknown_addresses_dropped() {
        let mut receiver = CommandReceiver::<PANELS>::new();
        // First unused panel address, past the effect slots, past the modes.
        for address in [5u8, 103, 125, 127] {
            let commands = feed_all(&mut receiver, &[0x80 | address, 1, 2, 3, 4, 0]);
            assert!(commands.is_empty(), "address {address} should be dropped");
            assert_eq!(receiver.state(), ReceiverState::Idle);
        }
    }

    #[test]
    fn test_mode_from_raw() {
        assert_eq!(DisplayMode::from_raw(3), Some(DisplayMode::TwoColorFade));
        assert_eq!(DisplayMode::from_raw(5), None);
        assert_eq!(DisplayMode::from_raw_or_off(9), DisplayMode::Off);
        assert_eq!(
            DisplayMode::parse_from_str(DisplayMode::PerPanelColor.as_str()),
            Some(DisplayMode::PerPanelColor)
        );
    }
}
