mod tests {
    use faba_ambiance::ByteSource;
    use faba_ambiance::channel::{ByteChannel, TryReceiveError, TrySendError};

    #[test]
    fn test_bytes_in_order() {
        let channel = ByteChannel::<4>::new();
        let sender = channel.sender();
        let mut receiver = channel.receiver();

        sender.try_send(0x81).unwrap();
        sender.try_send(0x01).unwrap();

        assert_eq!(channel.len(), 2);
        assert_eq!(receiver.read_byte(), Some(0x81));
        assert_eq!(receiver.read_byte(), Some(0x01));
        assert_eq!(receiver.read_byte(), None);
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_overrun_counted() {
        let channel = ByteChannel::<2>::new();
        channel.try_send(1).unwrap();
        channel.try_send(2).unwrap();

        assert_eq!(channel.try_send(3), Err(TrySendError(3)));
        assert_eq!(channel.overruns(), 1);
        assert_eq!(channel.try_receive(), Ok(1));
    }
}
