mod tests {
    use faba_ambiance::color::{BLACK, TRANSMIT_ORDER};
    use faba_ambiance::{
        BoosterPort, DataLines, Geometry, HandshakeOutcome, Rgbw, SweepError, TransmitCursor,
        Transmitter, rgbw,
    };
    use heapless::Vec;

    const PANELS: usize = 5;
    const LEDS_PER_PANEL: usize = 15;

    #[derive(Default)]
    struct RecordingPort {
        lines: DataLines,
        sent: Vec<u8, 1024>,
    }

    impl BoosterPort for RecordingPort {
        fn write_lines(&mut self, lines: DataLines) {
            self.lines = lines;
        }

        fn strobe(&mut self) {
            self.sent.push(self.lines.byte()).unwrap();
        }
    }

    type TestTransmitter = Transmitter<RecordingPort, PANELS, LEDS_PER_PANEL>;

    fn frame() -> [Rgbw; PANELS] {
        core::array::from_fn(|i| {
            let base = u8::try_from(i * 40).unwrap();
            rgbw(base + 1, base + 2, base + 3, base + 4)
        })
    }

    /// Kick off and run handshakes until the sweep terminates
    ///
    /// Returns the number of events consumed.
    fn run_sweep(transmitter: &mut TestTransmitter, frame: &[Rgbw], offset: usize) -> usize {
        transmitter.on_kickoff(frame, offset).unwrap();
        let mut events = 1;
        loop {
            events += 1;
            match transmitter.on_handshake(frame, offset) {
                HandshakeOutcome::Sent(_) => {}
                HandshakeOutcome::Finished => return events,
                HandshakeOutcome::Ignored => panic!("sweep stopped early"),
            }
            assert!(events < 1000);
        }
    }

    #[test]
    fn test_sweep_order() {
        let frame = frame();
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        let events = run_sweep(&mut transmitter, &frame, 0);

        assert_eq!(events, PANELS * LEDS_PER_PANEL * 4 + 1);
        assert_eq!(
            events,
            Geometry::<PANELS, LEDS_PER_PANEL, PANELS>::EVENTS_PER_SWEEP
        );

        let sent = &transmitter.port().sent;
        assert_eq!(sent.len(), PANELS * LEDS_PER_PANEL * 4);
        for panel in 0..PANELS {
            for led in 0..LEDS_PER_PANEL {
                for (slot, channel) in TRANSMIT_ORDER.iter().enumerate() {
                    let index = (panel * LEDS_PER_PANEL + led) * 4 + slot;
                    assert_eq!(sent[index], channel.of(frame[panel]), "byte {index}");
                }
            }
        }

        assert_eq!(transmitter.cursor(), TransmitCursor::IDLE);
    }

    #[test]
    fn test_panel_two_starts_at_byte_120() {
        let mut frame = [BLACK; PANELS];
        frame[2] = rgbw(10, 20, 30, 40);
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        run_sweep(&mut transmitter, &frame, 0);

        let sent = &transmitter.port().sent;
        assert_eq!(sent[..120].iter().filter(|b| **b != 0).count(), 0);
        assert_eq!(sent[120..124], [20, 10, 30, 40]);
    }

    #[test]
    fn test_offset_shifts_window() {
        let wide: [Rgbw; 8] = core::array::from_fn(|i| {
            let v = u8::try_from(i).unwrap();
            rgbw(0, v, 0, 0)
        });
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        run_sweep(&mut transmitter, &wide, 3);

        let sent = &transmitter.port().sent;
        for panel in 0..PANELS {
            let first_green = sent[panel * LEDS_PER_PANEL * 4];
            assert_eq!(usize::from(first_green), panel + 3);
        }
    }

    #[test]
    fn test_kickoff_refused_while_sweeping() {
        let frame = frame();
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        transmitter.on_kickoff(&frame, 0).unwrap();
        transmitter.on_handshake(&frame, 0);
        let cursor = transmitter.cursor();
        assert!(cursor.in_progress);
        assert_eq!(cursor.channel, TRANSMIT_ORDER[2]);

        assert_eq!(transmitter.on_kickoff(&frame, 0), Err(SweepError::Busy));
        assert_eq!(transmitter.cursor(), cursor);
        assert_eq!(transmitter.port().sent.len(), 2);
    }

    #[test]
    fn test_handshake_ignored_while_idle() {
        let frame = frame();
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        assert_eq!(
            transmitter.on_handshake(&frame, 0),
            HandshakeOutcome::Ignored
        );
        assert!(transmitter.port().sent.is_empty());
        assert!(!transmitter.is_sweeping());
    }

    #[test]
    fn test_back_to_back_sweeps() {
        let frame = frame();
        let mut transmitter = TestTransmitter::new(RecordingPort::default());

        run_sweep(&mut transmitter, &frame, 0);
        run_sweep(&mut transmitter, &frame, 0);

        let sent = &transmitter.port().sent;
        let half = sent.len() / 2;
        assert_eq!(sent[..half], sent[half..]);
    }

    #[test]
    fn test_data_lines_split() {
        let lines = DataLines::from_byte(0xA5);
        assert_eq!(lines.high, 0xA0);
        assert_eq!(lines.low, 0x05);
        assert_eq!(lines.byte(), 0xA5);
    }
}
